//! Chat history contract. The engine appends turns; it never reads history
//! back for matching.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ChatTurn, Language};

#[async_trait]
pub trait ChatHistory: Send + Sync {
    /// Ensure a session row exists, creating it with the given language.
    async fn get_or_create_session(&self, session_id: &str, language: Language) -> Result<()>;

    /// Append one turn to a session.
    async fn append(&self, turn: &ChatTurn) -> Result<()>;

    /// Turns of a session in insertion order.
    async fn session_history(&self, session_id: &str) -> Result<Vec<ChatTurn>>;
}
