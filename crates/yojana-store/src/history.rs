//! SQLite chat history — sessions and turns.

use async_trait::async_trait;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

use yojana_core::error::{Result, YojanaError};
use yojana_core::traits::ChatHistory;
use yojana_core::types::{ChatRole, ChatTurn, Language};

pub struct SqliteChatHistory {
    conn: Mutex<Connection>,
}

fn history_err(e: impl std::fmt::Display) -> YojanaError {
    YojanaError::History(e.to_string())
}

impl SqliteChatHistory {
    /// Open (or create) the history database at the given path.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path).map_err(history_err)?;
        Self::from_connection(conn)
    }

    /// In-memory history for tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(history_err)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                language TEXT NOT NULL DEFAULT 'en',
                created_at TEXT DEFAULT (datetime('now')),
                last_activity TEXT DEFAULT (datetime('now')),
                message_count INTEGER DEFAULT 0
            );
            CREATE TABLE IF NOT EXISTS turns (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                role TEXT NOT NULL,
                text TEXT NOT NULL,
                language TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                related_schemes TEXT NOT NULL DEFAULT '[]',
                confidence REAL
            );
            CREATE INDEX IF NOT EXISTS idx_turns_session ON turns(session_id);",
        )
        .map_err(history_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl ChatHistory for SqliteChatHistory {
    async fn get_or_create_session(&self, session_id: &str, language: Language) -> Result<()> {
        let conn = self.conn.lock().map_err(history_err)?;
        conn.execute(
            "INSERT OR IGNORE INTO sessions (id, language) VALUES (?1, ?2)",
            rusqlite::params![session_id, language.as_str()],
        )
        .map_err(history_err)?;
        Ok(())
    }

    async fn append(&self, turn: &ChatTurn) -> Result<()> {
        let conn = self.conn.lock().map_err(history_err)?;
        conn.execute(
            "INSERT INTO turns (session_id, role, text, language, timestamp, related_schemes, confidence)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                turn.session_id,
                turn.role.as_str(),
                turn.text,
                turn.language.as_str(),
                turn.timestamp.to_rfc3339(),
                serde_json::to_string(&turn.related_scheme_ids)?,
                turn.confidence,
            ],
        )
        .map_err(history_err)?;

        conn.execute(
            "UPDATE sessions SET message_count = message_count + 1, \
             last_activity = datetime('now') WHERE id = ?1",
            rusqlite::params![turn.session_id],
        )
        .ok();
        Ok(())
    }

    async fn session_history(&self, session_id: &str) -> Result<Vec<ChatTurn>> {
        let conn = self.conn.lock().map_err(history_err)?;
        let mut stmt = conn
            .prepare(
                "SELECT session_id, role, text, language, timestamp, related_schemes, confidence
                 FROM turns WHERE session_id = ?1 ORDER BY id",
            )
            .map_err(history_err)?;
        let rows = stmt
            .query_map(rusqlite::params![session_id], |row| {
                let role: String = row.get(1)?;
                let language: String = row.get(3)?;
                let timestamp: String = row.get(4)?;
                let related: String = row.get(5)?;
                Ok(ChatTurn {
                    session_id: row.get(0)?,
                    role: ChatRole::from_code(&role),
                    text: row.get(2)?,
                    language: Language::from_code(&language),
                    timestamp: chrono::DateTime::parse_from_rfc3339(&timestamp)
                        .map(|d| d.with_timezone(&chrono::Utc))
                        .unwrap_or_default(),
                    related_scheme_ids: serde_json::from_str(&related).unwrap_or_default(),
                    confidence: row.get(6)?,
                })
            })
            .map_err(history_err)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_and_read_back_in_order() {
        let history = SqliteChatHistory::in_memory().unwrap();
        history
            .get_or_create_session("sess1", Language::En)
            .await
            .unwrap();

        let user = ChatTurn::new("sess1", ChatRole::User, "any farmer schemes?", Language::En);
        let mut bot = ChatTurn::new("sess1", ChatRole::Bot, "Found 1 scheme", Language::En);
        bot.related_scheme_ids = vec!["s1".into()];
        bot.confidence = Some(0.8);

        history.append(&user).await.unwrap();
        history.append(&bot).await.unwrap();

        let turns = history.session_history("sess1").await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, ChatRole::User);
        assert_eq!(turns[1].role, ChatRole::Bot);
        assert_eq!(turns[1].related_scheme_ids, vec!["s1"]);
        assert_eq!(turns[1].confidence, Some(0.8));
    }

    #[tokio::test]
    async fn test_get_or_create_session_is_idempotent() {
        let history = SqliteChatHistory::in_memory().unwrap();
        history
            .get_or_create_session("s", Language::Hi)
            .await
            .unwrap();
        history
            .get_or_create_session("s", Language::Kn)
            .await
            .unwrap();
        // No turns yet, but the session exists and history is empty
        assert!(history.session_history("s").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let history = SqliteChatHistory::in_memory().unwrap();
        history
            .append(&ChatTurn::new("a", ChatRole::User, "hello", Language::En))
            .await
            .unwrap();
        history
            .append(&ChatTurn::new("b", ChatRole::User, "namaste", Language::Hi))
            .await
            .unwrap();
        assert_eq!(history.session_history("a").await.unwrap().len(), 1);
        assert_eq!(history.session_history("b").await.unwrap().len(), 1);
    }
}
