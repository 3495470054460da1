//! Speech collaborator contract — speech-to-text and text-to-speech.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::types::Language;

/// Result of a speech-to-text conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    pub text: String,
    pub language: Language,
    pub confidence: f32,
}

/// Synthesized audio bytes plus the container format ("mp3", "wav").
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub data: Vec<u8>,
    pub format: String,
}

#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Transcribe an audio file. Errors here abort the voice path.
    async fn speech_to_text(&self, audio: &Path) -> Result<Transcription>;

    /// Best-effort language detection; defaults to English on any failure.
    async fn detect_language(&self, audio: &Path) -> Language;

    /// Synthesize speech. `None` signals "could not synthesize" and is
    /// non-fatal to the caller.
    async fn text_to_speech(&self, text: &str, language: Language)
    -> Result<Option<SynthesizedAudio>>;
}
