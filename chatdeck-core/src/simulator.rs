//! Simulated bot replies.
//!
//! Every accepted send schedules exactly one templated reply after a fixed
//! delay. Pending replies are owned by the simulator: dropping it or calling
//! [`ReplySimulator::shutdown`] cancels them, and a reply whose session is gone
//! is skipped.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::config::SimulatorConfig;
use crate::error::{ChatdeckError, ChatdeckResult};
use crate::models::{Agent, Message};
use crate::session::SharedSession;

/// Which selection a reply is attributed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyAttribution {
    /// The agent selected when the reply is delivered.
    #[default]
    AtDelivery,
    /// The agent selected when the user message was sent.
    AtSend,
}

pub fn reply_text(agent: Option<&Agent>, fallback_name: &str) -> String {
    format!(
        "This is a response from {}",
        agent.map(|a| a.name).unwrap_or(fallback_name)
    )
}

pub struct ReplySimulator {
    delay: Duration,
    fallback_name: Arc<str>,
    attribution: ReplyAttribution,
    tasks: JoinSet<ChatdeckResult<Message>>,
}

impl ReplySimulator {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            fallback_name: Arc::from("the bot"),
            attribution: ReplyAttribution::default(),
            tasks: JoinSet::new(),
        }
    }

    pub fn from_config(config: &SimulatorConfig) -> Self {
        Self::new(config.reply_delay())
            .with_fallback_name(config.fallback_name.as_str())
            .with_attribution(config.attribution)
    }

    pub fn with_fallback_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.fallback_name = name.into();
        self
    }

    pub fn with_attribution(mut self, attribution: ReplyAttribution) -> Self {
        self.attribution = attribution;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn attribution(&self) -> ReplyAttribution {
        self.attribution
    }

    /// Appends the user message and schedules its reply. Blank input is
    /// ignored and returns `None`.
    pub async fn send(&mut self, session: &SharedSession, input: &str) -> Option<Message> {
        let (message, agent_at_send) = {
            let mut guard = session.write().await;
            let message = guard.push_user(input)?;
            (message, guard.selected_agent())
        };

        info!(
            message_id = %message.id,
            agent = agent_at_send.map(|a| a.id).unwrap_or("none"),
            "User message sent"
        );

        self.schedule_reply(session, agent_at_send);
        Some(message)
    }

    fn schedule_reply(&mut self, session: &SharedSession, agent_at_send: Option<&'static Agent>) {
        self.reap_finished();

        let weak = Arc::downgrade(session);
        let deadline = Instant::now() + self.delay;
        let fallback_name = Arc::clone(&self.fallback_name);
        let attribution = self.attribution;

        self.tasks.spawn(async move {
            sleep_until(deadline).await;

            let session = weak.upgrade().ok_or(ChatdeckError::SessionUnavailable)?;
            let mut guard = session.write().await;

            let agent = match attribution {
                ReplyAttribution::AtDelivery => guard.selected_agent(),
                ReplyAttribution::AtSend => agent_at_send,
            };
            let message = guard.push_bot(reply_text(agent, &fallback_name));

            info!(message_id = %message.id, "Bot reply delivered");
            Ok(message)
        });
    }

    /// Number of replies scheduled but not yet delivered.
    pub fn pending_replies(&mut self) -> usize {
        self.reap_finished();
        self.tasks.len()
    }

    /// Collects replies that have already finished without waiting.
    pub fn reap_finished(&mut self) -> Vec<Message> {
        let mut delivered = Vec::new();
        while let Some(result) = self.tasks.try_join_next() {
            if let Some(message) = Self::settle(result) {
                delivered.push(message);
            }
        }
        delivered
    }

    /// Waits for every pending reply and returns the delivered ones in
    /// completion order.
    pub async fn drain(&mut self) -> Vec<Message> {
        let mut delivered = Vec::new();
        while let Some(result) = self.tasks.join_next().await {
            if let Some(message) = Self::settle(result) {
                delivered.push(message);
            }
        }
        delivered
    }

    /// Cancels every pending reply.
    pub fn shutdown(&mut self) {
        let pending = self.tasks.len();
        if pending > 0 {
            debug!(pending, "Cancelling pending replies");
        }
        self.tasks.abort_all();
    }

    fn settle(
        result: Result<ChatdeckResult<Message>, tokio::task::JoinError>,
    ) -> Option<Message> {
        match result {
            Ok(Ok(message)) => Some(message),
            Ok(Err(e)) => {
                debug!(code = e.code(), "Reply skipped: {}", e);
                None
            }
            Err(e) if e.is_cancelled() => None,
            Err(e) => {
                warn!("Reply task failed: {}", e);
                None
            }
        }
    }
}

impl Drop for ReplySimulator {
    fn drop(&mut self) {
        self.shutdown();
    }
}
