//! Static agent and topic catalogs.
//!
//! Both catalogs are compiled in and never change while the process runs.

use crate::error::{ChatdeckError, ChatdeckResult};
use crate::models::{Agent, Topic};

const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/bottts/svg";

pub static AGENTS: [Agent; 2] = [
    Agent {
        id: "mark",
        name: "Mark",
        avatar: "https://api.dicebear.com/7.x/bottts/svg?seed=mark",
        topics: &["AI Research", "Data Science", "Machine Learning"],
    },
    Agent {
        id: "athena",
        name: "Athena",
        avatar: "https://api.dicebear.com/7.x/bottts/svg?seed=athena",
        topics: &[
            "Natural Language Processing",
            "Computer Vision",
            "Robotics",
        ],
    },
];

pub static TOPICS: [Topic; 7] = [
    Topic::new("Forum"),
    Topic::new("Offre"),
    Topic::new("History"),
    Topic::new("Topics"),
    Topic::new("Visios"),
    Topic::new("Support"),
    Topic::new("News"),
];

pub fn agents() -> &'static [Agent] {
    &AGENTS
}

pub fn topics() -> &'static [Topic] {
    &TOPICS
}

pub fn find_agent(id: &str) -> ChatdeckResult<&'static Agent> {
    AGENTS
        .iter()
        .find(|agent| agent.id == id)
        .ok_or_else(|| ChatdeckError::AgentNotFound(id.to_string()))
}

/// Avatar image URL for a seed; the seed is the agent id.
pub fn avatar_url(seed: &str) -> String {
    format!("{AVATAR_BASE_URL}?seed={seed}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_agent_ids_are_unique() {
        let ids: HashSet<_> = agents().iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), agents().len());
    }

    #[test]
    fn test_find_agent() {
        assert_eq!(find_agent("athena").unwrap().name, "Athena");
        assert!(matches!(
            find_agent("zeus"),
            Err(ChatdeckError::AgentNotFound(id)) if id == "zeus"
        ));
    }

    #[test]
    fn test_avatar_url() {
        assert_eq!(
            avatar_url("mark"),
            "https://api.dicebear.com/7.x/bottts/svg?seed=mark"
        );
        for agent in agents() {
            assert_eq!(agent.avatar, avatar_url(agent.id));
        }
    }

    #[test]
    fn test_topics_order() {
        let labels: Vec<_> = topics().iter().map(|t| t.label()).collect();
        assert_eq!(
            labels,
            ["Forum", "Offre", "History", "Topics", "Visios", "Support", "News"]
        );
    }
}
