//! # Yojana Core
//! Shared foundation for the scheme assistant — record types, collaborator
//! traits, configuration, and the error enum.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::AssistantConfig;
pub use error::{Result, YojanaError};
