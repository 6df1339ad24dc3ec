mod agent;
mod message;
mod topic;

pub use agent::Agent;
pub use message::{Message, MessageIdGenerator, Sender};
pub use topic::Topic;
