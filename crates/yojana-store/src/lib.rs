//! # Yojana Store
//! SQLite persistence — the scheme catalog behind the `SchemeStore` trait
//! and the chat history behind `ChatHistory`. Zero setup, one file each.

pub mod history;
pub mod sqlite;

pub use history::SqliteChatHistory;
pub use sqlite::SqliteSchemeStore;
