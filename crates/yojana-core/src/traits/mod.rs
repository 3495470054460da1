//! Collaborator contracts consumed by the chatbot engine.

pub mod history;
pub mod speech;
pub mod store;

pub use history::ChatHistory;
pub use speech::{SpeechProvider, SynthesizedAudio, Transcription};
pub use store::SchemeStore;
