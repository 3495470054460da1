//! Record and query types shared across the workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sector a scheme belongs to. Closed set matching the scheme catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Agriculture,
    Health,
    Education,
    Employment,
    SocialWelfare,
    RuralDevelopment,
    UrbanDevelopment,
    WomenEmpowerment,
    YouthDevelopment,
    SeniorCitizens,
    Disability,
    Other,
}

impl Sector {
    /// All sectors, in catalog order.
    pub const ALL: &[Sector] = &[
        Sector::Agriculture,
        Sector::Health,
        Sector::Education,
        Sector::Employment,
        Sector::SocialWelfare,
        Sector::RuralDevelopment,
        Sector::UrbanDevelopment,
        Sector::WomenEmpowerment,
        Sector::YouthDevelopment,
        Sector::SeniorCitizens,
        Sector::Disability,
        Sector::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Agriculture => "agriculture",
            Sector::Health => "health",
            Sector::Education => "education",
            Sector::Employment => "employment",
            Sector::SocialWelfare => "social_welfare",
            Sector::RuralDevelopment => "rural_development",
            Sector::UrbanDevelopment => "urban_development",
            Sector::WomenEmpowerment => "women_empowerment",
            Sector::YouthDevelopment => "youth_development",
            Sector::SeniorCitizens => "senior_citizens",
            Sector::Disability => "disability",
            Sector::Other => "other",
        }
    }

    /// Parse a catalog code. Unknown codes map to `Other`.
    pub fn from_code(code: &str) -> Self {
        Sector::ALL
            .iter()
            .copied()
            .find(|s| s.as_str() == code)
            .unwrap_or(Sector::Other)
    }

    /// Human-readable label for rendered responses ("social_welfare" → "Social Welfare").
    pub fn display_name(&self) -> String {
        self.as_str()
            .split('_')
            .map(|w| {
                let mut c = w.chars();
                match c.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + c.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported response languages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Kn,
    Ta,
    Te,
    Bn,
    Gu,
    Mr,
    Pa,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Kn => "kn",
            Language::Ta => "ta",
            Language::Te => "te",
            Language::Bn => "bn",
            Language::Gu => "gu",
            Language::Mr => "mr",
            Language::Pa => "pa",
        }
    }

    /// Parse a language code, accepting the full language name as an alias
    /// (speech services report both). Unknown codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "en" | "english" => Language::En,
            "hi" | "hindi" => Language::Hi,
            "kn" | "kannada" => Language::Kn,
            "ta" | "tamil" => Language::Ta,
            "te" | "telugu" => Language::Te,
            "bn" | "bengali" => Language::Bn,
            "gu" | "gujarati" => Language::Gu,
            "mr" | "marathi" => Language::Mr,
            "pa" | "punjabi" => Language::Pa,
            _ => Language::En,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level of government that runs a scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GovernmentLevel {
    #[default]
    Central,
    State,
    Local,
}

impl GovernmentLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GovernmentLevel::Central => "central",
            GovernmentLevel::State => "state",
            GovernmentLevel::Local => "local",
        }
    }
}

/// A government welfare scheme record. Owned by the scheme store;
/// read-only to the assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    pub sector: Sector,
    #[serde(default)]
    pub government_level: GovernmentLevel,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub ministry: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub eligibility_criteria: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub application_process: Option<String>,
    #[serde(default)]
    pub application_link: Option<String>,
    #[serde(default)]
    pub launch_date: Option<String>,
    #[serde(default)]
    pub last_date: Option<String>,
    #[serde(default)]
    pub helpline_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub search_tags: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub language: Language,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Classified purpose of a user query.
/// The order of the first eight variants is the classifier's evaluation
/// order and the tie-break contract — do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SearchScheme,
    GetInfo,
    Eligibility,
    Application,
    Benefits,
    SectorSpecific,
    Greeting,
    Help,
    GeneralQuery,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::SearchScheme => "search_scheme",
            Intent::GetInfo => "get_info",
            Intent::Eligibility => "eligibility",
            Intent::Application => "application",
            Intent::Benefits => "benefits",
            Intent::SectorSpecific => "sector_specific",
            Intent::Greeting => "greeting",
            Intent::Help => "help",
            Intent::GeneralQuery => "general_query",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
    System,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Bot => "bot",
            ChatRole::System => "system",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "bot" => ChatRole::Bot,
            "system" => ChatRole::System,
            _ => ChatRole::User,
        }
    }
}

/// One turn in a chat session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub session_id: String,
    pub role: ChatRole,
    pub text: String,
    pub language: Language,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub related_scheme_ids: Vec<String>,
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl ChatTurn {
    pub fn new(session_id: &str, role: ChatRole, text: &str, language: Language) -> Self {
        Self {
            session_id: session_id.to_string(),
            role,
            text: text.to_string(),
            language,
            timestamp: Utc::now(),
            related_scheme_ids: Vec::new(),
            confidence: None,
        }
    }
}

/// Scheme field that can be required present by an intent-conditioned filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceField {
    EligibilityCriteria,
    ApplicationProcess,
    Benefits,
}

/// Filter handed to the scheme store by the matcher.
/// All clauses apply conjunctively; text terms within `text_any` are an
/// OR-alternation checked across title, description, keywords, and
/// search_tags.
#[derive(Debug, Clone, Default)]
pub struct SchemeQuery {
    pub sectors: Vec<Sector>,
    pub text_any: Vec<String>,
    pub require: Option<PresenceField>,
    pub limit: usize,
}

/// Result ordering for advanced search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// No sort applied — natural store order.
    #[default]
    Relevance,
    Alphabetical,
    Newest,
    Oldest,
}

/// Parameterized filter for advanced search. Every filter is optional and
/// independent; string filters match as case-insensitive substrings.
#[derive(Debug, Clone, Default)]
pub struct AdvancedQuery {
    pub sector: Option<String>,
    pub ministry: Option<String>,
    pub eligibility: Option<String>,
    pub keywords: Vec<String>,
    pub sort: SortOrder,
    pub limit: usize,
}

/// Per-sector scheme counts reported by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreStatistics {
    pub total_schemes: u64,
    pub active_schemes: u64,
    pub sectors: Vec<(Sector, u64)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_round_trip() {
        for s in Sector::ALL {
            assert_eq!(Sector::from_code(s.as_str()), *s);
        }
        assert_eq!(Sector::from_code("no_such_sector"), Sector::Other);
    }

    #[test]
    fn test_sector_display_name() {
        assert_eq!(Sector::SocialWelfare.display_name(), "Social Welfare");
        assert_eq!(Sector::Agriculture.display_name(), "Agriculture");
    }

    #[test]
    fn test_language_from_code_aliases() {
        assert_eq!(Language::from_code("kn"), Language::Kn);
        assert_eq!(Language::from_code("kannada"), Language::Kn);
        assert_eq!(Language::from_code("HINDI"), Language::Hi);
        // Unknown codes default to English
        assert_eq!(Language::from_code("xx"), Language::En);
    }

    #[test]
    fn test_intent_serde_codes() {
        let json = serde_json::to_string(&Intent::SearchScheme).unwrap();
        assert_eq!(json, "\"search_scheme\"");
        let back: Intent = serde_json::from_str("\"general_query\"").unwrap();
        assert_eq!(back, Intent::GeneralQuery);
    }

    #[test]
    fn test_scheme_record_defaults_on_deserialize() {
        let json = r#"{"id":"s1","title":"Test Scheme","sector":"health"}"#;
        let rec: SchemeRecord = serde_json::from_str(json).unwrap();
        assert!(rec.is_active);
        assert_eq!(rec.language, Language::En);
        assert!(rec.keywords.is_empty());
        assert!(rec.eligibility_criteria.is_none());
    }
}
