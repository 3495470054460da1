//! Chatbot orchestration: wires the NLU pipeline to the scheme store and
//! renders templated answers.

pub mod chatbot;
pub mod composer;
pub mod matcher;

pub use chatbot::{Chatbot, QueryResponse, SchemeSummary, VoiceResponse};
pub use composer::{ComposedResponse, ResponseComposer};
pub use matcher::SchemeMatcher;
