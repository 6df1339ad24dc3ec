//! Error types for the Chatdeck core library.
//!
//! # Error Codes Reference
//!
//! | Code Range | Category | Description |
//! |------------|----------|-------------|
//! | E2001-E2099 | Agent | Catalog lookup errors |
//! | E3001-E3099 | Session | Chat session lifecycle errors |

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatdeckError {
    // ========================================================================
    // Agent Errors (E2001-E2099)
    // ========================================================================
    /// No agent with this id exists in the catalog
    #[error("[E2001] Agent not found: {0}")]
    AgentNotFound(String),

    // ========================================================================
    // Session Errors (E3001-E3099)
    // ========================================================================
    /// The chat session was dropped before a pending reply could be delivered
    #[error("[E3001] Chat session is no longer available")]
    SessionUnavailable,
}

impl ChatdeckError {
    pub fn code(&self) -> &'static str {
        match self {
            ChatdeckError::AgentNotFound(_) => "E2001",
            ChatdeckError::SessionUnavailable => "E3001",
        }
    }
}

/// Result type alias for Chatdeck operations.
pub type ChatdeckResult<T> = Result<T, ChatdeckError>;
