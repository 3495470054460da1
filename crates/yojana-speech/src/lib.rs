//! Speech providers — HTTP speech-to-text and text-to-speech.
//!
//! Talks to a companion speech service over plain JSON: audio goes out
//! base64-encoded, transcriptions and synthesized audio come back the
//! same way. STT failures are hard errors (the voice path cannot
//! continue without a transcript); TTS failures are soft — the caller
//! gets `None` and answers in text only.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use yojana_core::config::SpeechConfig;
use yojana_core::error::{Result, YojanaError};
use yojana_core::traits::{SpeechProvider, SynthesizedAudio, Transcription};
use yojana_core::types::Language;

/// Speech provider backed by an HTTP speech service.
pub struct HttpSpeechProvider {
    client: reqwest::Client,
    stt_url: String,
    tts_url: String,
}

#[derive(Debug, Deserialize)]
struct SttResponse {
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    confidence: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct TtsResponse {
    audio: String,
    #[serde(default = "default_audio_format")]
    format: String,
}

fn default_audio_format() -> String {
    "mp3".into()
}

fn speech_err(e: impl std::fmt::Display) -> YojanaError {
    YojanaError::Speech(e.to_string())
}

/// Audio container format from the file extension, defaulting to wav.
fn format_from_path(audio: &Path) -> &str {
    match audio.extension().and_then(|e| e.to_str()) {
        Some("mp3") => "mp3",
        Some("ogg") => "ogg",
        Some("m4a") => "m4a",
        Some("flac") => "flac",
        _ => "wav",
    }
}

impl HttpSpeechProvider {
    pub fn new(config: &SpeechConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(speech_err)?;
        Ok(Self {
            client,
            stt_url: config.stt_url.clone(),
            tts_url: config.tts_url.clone(),
        })
    }

    async fn transcribe(&self, audio: &Path) -> Result<SttResponse> {
        let bytes = tokio::fs::read(audio).await?;
        let resp = self
            .client
            .post(&self.stt_url)
            .json(&serde_json::json!({
                "audio": BASE64.encode(&bytes),
                "format": format_from_path(audio),
            }))
            .send()
            .await
            .map_err(speech_err)?;

        if !resp.status().is_success() {
            return Err(YojanaError::Speech(format!(
                "STT service returned {}",
                resp.status()
            )));
        }
        resp.json::<SttResponse>().await.map_err(speech_err)
    }
}

#[async_trait]
impl SpeechProvider for HttpSpeechProvider {
    async fn speech_to_text(&self, audio: &Path) -> Result<Transcription> {
        let stt = self.transcribe(audio).await?;
        if stt.text.trim().is_empty() {
            return Err(YojanaError::Speech("empty transcription".into()));
        }
        tracing::debug!(text = %stt.text, "transcribed audio");
        Ok(Transcription {
            text: stt.text,
            language: stt
                .language
                .as_deref()
                .map(Language::from_code)
                .unwrap_or_default(),
            confidence: stt.confidence.unwrap_or(0.0),
        })
    }

    async fn detect_language(&self, audio: &Path) -> Language {
        match self.transcribe(audio).await {
            Ok(stt) => stt
                .language
                .as_deref()
                .map(Language::from_code)
                .unwrap_or_default(),
            Err(e) => {
                tracing::warn!("language detection failed, assuming English: {e}");
                Language::En
            }
        }
    }

    async fn text_to_speech(
        &self,
        text: &str,
        language: Language,
    ) -> Result<Option<SynthesizedAudio>> {
        let resp = match self
            .client
            .post(&self.tts_url)
            .json(&serde_json::json!({
                "text": text,
                "language": language.as_str(),
            }))
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => resp,
            Ok(resp) => {
                tracing::warn!("TTS service returned {}", resp.status());
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!("TTS request failed: {e}");
                return Ok(None);
            }
        };

        let tts: TtsResponse = match resp.json().await {
            Ok(tts) => tts,
            Err(e) => {
                tracing::warn!("TTS response parse failed: {e}");
                return Ok(None);
            }
        };
        let data = match BASE64.decode(&tts.audio) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("TTS audio decode failed: {e}");
                return Ok(None);
            }
        };
        Ok(Some(SynthesizedAudio {
            data,
            format: tts.format,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stt_response_parsing() {
        let stt: SttResponse = serde_json::from_str(
            r#"{"text": "scheme for farmers", "language": "en", "confidence": 0.92}"#,
        )
        .unwrap();
        assert_eq!(stt.text, "scheme for farmers");
        assert_eq!(stt.language.as_deref(), Some("en"));
        assert_eq!(stt.confidence, Some(0.92));
    }

    #[test]
    fn test_stt_response_optional_fields() {
        let stt: SttResponse = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
        assert!(stt.language.is_none());
        assert!(stt.confidence.is_none());
    }

    #[test]
    fn test_tts_response_default_format() {
        let tts: TtsResponse = serde_json::from_str(r#"{"audio": "dGVzdA=="}"#).unwrap();
        assert_eq!(tts.format, "mp3");
        assert_eq!(BASE64.decode(&tts.audio).unwrap(), b"test");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(format_from_path(Path::new("query.mp3")), "mp3");
        assert_eq!(format_from_path(Path::new("query.wav")), "wav");
        assert_eq!(format_from_path(Path::new("query")), "wav");
    }

    #[tokio::test]
    async fn test_stt_unreachable_service_is_an_error() {
        let config = SpeechConfig {
            enabled: true,
            stt_url: "http://127.0.0.1:1/stt".into(),
            tts_url: "http://127.0.0.1:1/tts".into(),
            timeout_secs: 1,
        };
        let provider = HttpSpeechProvider::new(&config).unwrap();
        let tmp = std::env::temp_dir().join("yojana-stt-test.wav");
        std::fs::write(&tmp, b"not really audio").unwrap();
        assert!(provider.speech_to_text(&tmp).await.is_err());
        // TTS degrades to None instead of failing
        let audio = provider.text_to_speech("hello", Language::En).await.unwrap();
        assert!(audio.is_none());
        std::fs::remove_file(&tmp).ok();
    }
}
