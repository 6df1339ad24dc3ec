pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod simulator;

pub use catalog::{agents, avatar_url, find_agent, topics, AGENTS, TOPICS};
pub use config::{ChatdeckConfig, ConfigLoadError, LoggingConfig, SimulatorConfig, TuiConfig};
pub use error::{ChatdeckError, ChatdeckResult};
pub use models::{Agent, Message, MessageIdGenerator, Sender, Topic};
pub use session::{ChatSession, SelectionChange, SharedSession, HEADER_PLACEHOLDER};
pub use simulator::{reply_text, ReplyAttribution, ReplySimulator};
