mod agent_rail;
mod conversation;
mod topic_rail;

pub use agent_rail::AgentRailView;
pub use conversation::ConversationView;
pub use topic_rail::TopicRailView;
