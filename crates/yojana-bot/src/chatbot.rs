//! Chatbot orchestrator — the pipeline from raw query text to a structured
//! answer.
//!
//! Every public entry point returns a structured result with an explicit
//! success flag and never propagates an error to the caller. Language and
//! session are per-call parameters, so one `Chatbot` can safely serve
//! concurrent callers.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use yojana_core::YojanaError;
use yojana_core::traits::{ChatHistory, SchemeStore, SpeechProvider, SynthesizedAudio};
use yojana_core::types::{ChatRole, ChatTurn, Intent, Language, SchemeRecord};
use yojana_nlu::{EntityExtractor, IntentClassifier, KeywordExtractor};

use crate::composer::{ComposedResponse, ResponseComposer, error_text};
use crate::matcher::SchemeMatcher;

/// At most this many scheme summaries are returned per answer.
const MAX_SUMMARIES: usize = 5;
/// At most this many scheme ids are attached to a logged bot turn.
const MAX_RELATED: usize = 3;

/// Condensed scheme record returned alongside the composed answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeSummary {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub sector: String,
    pub ministry: Option<String>,
    pub benefits: Option<String>,
    pub application_link: Option<String>,
    pub source_url: Option<String>,
}

impl From<&SchemeRecord> for SchemeSummary {
    fn from(scheme: &SchemeRecord) -> Self {
        Self {
            id: scheme.id.clone(),
            title: scheme.title.clone(),
            short_description: scheme.short_description.clone(),
            sector: scheme.sector.as_str().to_string(),
            ministry: scheme.ministry.clone(),
            benefits: scheme.benefits.clone(),
            application_link: scheme.application_link.clone(),
            source_url: scheme.source_url.clone(),
        }
    }
}

/// Result of a text query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub success: bool,
    pub response: ComposedResponse,
    pub schemes: Vec<SchemeSummary>,
    pub intent: Intent,
    pub keywords: Vec<String>,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a voice query. `audio` is absent when synthesis was
/// unavailable; the text answer still stands on its own.
#[derive(Debug, Clone)]
pub struct VoiceResponse {
    pub success: bool,
    pub text_response: String,
    pub audio: Option<SynthesizedAudio>,
    pub language: Language,
    pub schemes: Vec<SchemeSummary>,
    pub confidence: f32,
    pub user_text: Option<String>,
    pub error: Option<String>,
}

pub struct Chatbot {
    history: Option<Arc<dyn ChatHistory>>,
    speech: Option<Arc<dyn SpeechProvider>>,
    classifier: IntentClassifier,
    keywords: KeywordExtractor,
    entities: EntityExtractor,
    matcher: SchemeMatcher,
    composer: ResponseComposer,
}

impl Chatbot {
    pub fn new(store: Arc<dyn SchemeStore>) -> Self {
        Self {
            history: None,
            speech: None,
            classifier: IntentClassifier::new(),
            keywords: KeywordExtractor::new(),
            entities: EntityExtractor::new(),
            matcher: SchemeMatcher::new(store),
            composer: ResponseComposer::new(),
        }
    }

    /// Attach a chat history store. Turns are logged per session; history
    /// failures never fail a query.
    pub fn with_history(mut self, history: Arc<dyn ChatHistory>) -> Self {
        self.history = Some(history);
        self
    }

    /// Attach a speech provider for the voice path.
    pub fn with_speech(mut self, speech: Arc<dyn SpeechProvider>) -> Self {
        self.speech = Some(speech);
        self
    }

    /// Process a text query.
    ///
    /// The pipeline: validate → log user turn → classify intent → extract
    /// keywords and entities → match schemes → compose → log bot turn.
    /// Never returns an error: failures surface as a structured result
    /// with `success == false` and confidence 0.0.
    pub async fn process_query(
        &self,
        query: &str,
        language: Language,
        session_id: Option<&str>,
    ) -> QueryResponse {
        if query.trim().is_empty() {
            return QueryResponse {
                success: false,
                response: ComposedResponse {
                    text: error_text(language).to_string(),
                    confidence: 0.0,
                    intent: Intent::GeneralQuery,
                    scheme_count: 0,
                },
                schemes: Vec::new(),
                intent: Intent::GeneralQuery,
                keywords: Vec::new(),
                language,
                error: Some(
                    YojanaError::InvalidQuery("query text must not be empty".into()).to_string(),
                ),
            };
        }

        self.log_turn(session_id, ChatRole::User, query, language, &[], None)
            .await;

        let intent = self.classifier.classify(query);
        let keywords = self.keywords.extract(query);
        let entities = self.entities.extract(query);
        tracing::debug!(intent = %intent, ?keywords, "classified query");

        let schemes = self
            .matcher
            .find_relevant(query, &keywords, &entities, intent)
            .await;
        let response = self.composer.compose(intent, &schemes, language);

        let related: Vec<String> = schemes.iter().take(MAX_RELATED).map(|s| s.id.clone()).collect();
        self.log_turn(
            session_id,
            ChatRole::Bot,
            &response.text,
            language,
            &related,
            Some(response.confidence),
        )
        .await;

        QueryResponse {
            success: true,
            schemes: schemes.iter().take(MAX_SUMMARIES).map(SchemeSummary::from).collect(),
            intent,
            keywords,
            language,
            error: None,
            response,
        }
    }

    /// Process a voice query: transcribe, delegate to [`process_query`],
    /// then attach synthesized audio when available.
    ///
    /// A speech-to-text failure short-circuits to a structured failure.
    /// A text-to-speech failure is non-fatal; the answer stays text-only.
    ///
    /// [`process_query`]: Chatbot::process_query
    pub async fn process_voice_query(
        &self,
        audio: &Path,
        session_id: Option<&str>,
    ) -> VoiceResponse {
        let Some(speech) = &self.speech else {
            return voice_failure("speech provider not configured".into());
        };

        let transcription = match speech.speech_to_text(audio).await {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!("speech-to-text failed: {e}");
                return voice_failure(e.to_string());
            }
        };

        let result = self
            .process_query(&transcription.text, transcription.language, session_id)
            .await;
        if !result.success {
            return VoiceResponse {
                success: false,
                text_response: result.response.text,
                audio: None,
                language: transcription.language,
                schemes: Vec::new(),
                confidence: 0.0,
                user_text: Some(transcription.text),
                error: result.error,
            };
        }

        let audio_payload = match speech.text_to_speech(&result.response.text, result.language).await
        {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("text-to-speech failed, returning text only: {e}");
                None
            }
        };

        VoiceResponse {
            success: true,
            text_response: result.response.text,
            audio: audio_payload,
            language: result.language,
            schemes: result.schemes,
            confidence: result.response.confidence,
            user_text: Some(transcription.text),
            error: None,
        }
    }

    async fn log_turn(
        &self,
        session_id: Option<&str>,
        role: ChatRole,
        text: &str,
        language: Language,
        related: &[String],
        confidence: Option<f32>,
    ) {
        let (Some(history), Some(sid)) = (&self.history, session_id) else {
            return;
        };
        if let Err(e) = history.get_or_create_session(sid, language).await {
            tracing::warn!("failed to open chat session {sid}: {e}");
            return;
        }
        let mut turn = ChatTurn::new(sid, role, text, language);
        turn.related_scheme_ids = related.to_vec();
        turn.confidence = confidence;
        if let Err(e) = history.append(&turn).await {
            tracing::warn!("failed to log chat turn: {e}");
        }
    }
}

fn voice_failure(error: String) -> VoiceResponse {
    VoiceResponse {
        success: false,
        text_response: "Voice processing failed. Please try again or use text input.".into(),
        audio: None,
        language: Language::En,
        schemes: Vec::new(),
        confidence: 0.0,
        user_text: None,
        error: Some(error),
    }
}
