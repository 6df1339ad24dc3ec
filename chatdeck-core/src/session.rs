//! In-memory chat session: the current agent selection and the append-only
//! message list.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::catalog;
use crate::error::ChatdeckResult;
use crate::models::{Agent, Message, MessageIdGenerator, Sender};

pub const HEADER_PLACEHOLDER: &str = "Select an AI agent to start chatting";

/// Session handle shared between the UI loop and pending reply tasks.
pub type SharedSession = Arc<RwLock<ChatSession>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Changed {
        from: Option<&'static Agent>,
        to: &'static Agent,
    },
    Unchanged,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    selected: Option<&'static Agent>,
    messages: Vec<Message>,
    ids: MessageIdGenerator,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedSession {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Selects a catalog agent. Selecting the current agent again changes
    /// nothing; there is no way back to "no selection".
    pub fn select_agent(&mut self, id: &str) -> ChatdeckResult<SelectionChange> {
        let agent = catalog::find_agent(id)?;

        if self.selected.is_some_and(|current| current.id == agent.id) {
            debug!(agent = agent.id, "Agent already selected");
            return Ok(SelectionChange::Unchanged);
        }

        let from = self.selected.replace(agent);
        info!(agent = agent.id, "Selected agent");
        Ok(SelectionChange::Changed { from, to: agent })
    }

    pub fn selected_agent(&self) -> Option<&'static Agent> {
        self.selected
    }

    pub fn header_title(&self) -> &'static str {
        self.selected.map(|a| a.name).unwrap_or(HEADER_PLACEHOLDER)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Appends a user message unless the input is empty after trimming.
    /// The stored text is the input as typed.
    pub fn push_user(&mut self, input: &str) -> Option<Message> {
        if input.trim().is_empty() {
            return None;
        }
        Some(self.push(input, Sender::User))
    }

    pub fn push_bot(&mut self, text: impl Into<String>) -> Message {
        self.push(text, Sender::Bot)
    }

    fn push(&mut self, text: impl Into<String>, sender: Sender) -> Message {
        let now = Utc::now();
        let message = Message::new(self.ids.next_id(now), text, sender, now);
        self.messages.push(message.clone());
        message
    }
}
