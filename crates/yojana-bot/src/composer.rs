//! Response composer — renders matched schemes into templated prose.
//!
//! Greeting, help, no-results, and error texts are fixed per language
//! (English, Hindi, Kannada; everything else falls back to English).
//! Confidence values are fixed constants so responses stay deterministic:
//! 0.8 with matches, 0.5 without, 0.0 on error.

use serde::{Deserialize, Serialize};

use yojana_core::types::{Intent, Language, SchemeRecord};

/// Character budget for inline descriptions.
const SHORT_TRUNCATE: usize = 200;
/// Character budget for eligibility/process/benefits excerpts.
const LONG_TRUNCATE: usize = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposedResponse {
    pub text: String,
    pub confidence: f32,
    pub intent: Intent,
    pub scheme_count: usize,
}

/// Stateless template renderer.
pub struct ResponseComposer;

impl ResponseComposer {
    pub fn new() -> Self {
        Self
    }

    /// Render a response for the given intent, matched schemes, and language.
    /// An empty match list always renders the no-results message, even for
    /// greeting/help intents.
    pub fn compose(
        &self,
        intent: Intent,
        schemes: &[SchemeRecord],
        language: Language,
    ) -> ComposedResponse {
        if schemes.is_empty() {
            return ComposedResponse {
                text: no_results_text(language).to_string(),
                confidence: 0.5,
                intent,
                scheme_count: 0,
            };
        }

        let text = match intent {
            Intent::Greeting => greeting_text(language).to_string(),
            Intent::Help => help_text(language).to_string(),
            Intent::GetInfo => info_response(&schemes[0]),
            Intent::Eligibility => eligibility_response(schemes),
            Intent::Application => application_response(schemes),
            Intent::Benefits => benefits_response(schemes),
            _ => general_response(schemes),
        };

        ComposedResponse {
            text,
            confidence: 0.8,
            intent,
            scheme_count: schemes.len(),
        }
    }

    /// Generic apology used when query processing fails internally.
    pub fn error_text(&self, language: Language) -> String {
        error_text(language).to_string()
    }
}

impl Default for ResponseComposer {
    fn default() -> Self {
        Self::new()
    }
}

/// First `limit` characters followed by "...". Character-based, not byte-based,
/// so Devanagari and Kannada text truncates cleanly.
fn truncate(text: &str, limit: usize) -> String {
    let mut out: String = text.chars().take(limit).collect();
    out.push_str("...");
    out
}

fn info_response(scheme: &SchemeRecord) -> String {
    let mut response = format!("Here's information about {}:\n\n", scheme.title);
    response.push_str(&format!("Description: {}\n\n", scheme.short_description));

    if let Some(ministry) = &scheme.ministry {
        response.push_str(&format!("Ministry: {ministry}\n"));
    }
    if let Some(department) = &scheme.department {
        response.push_str(&format!("Department: {department}\n"));
    }
    if let Some(eligibility) = &scheme.eligibility_criteria {
        response.push_str(&format!(
            "Eligibility: {}\n",
            truncate(eligibility, SHORT_TRUNCATE)
        ));
    }

    response.push_str(&format!(
        "\nFor more details, visit: {}",
        scheme.source_url.as_deref().unwrap_or("N/A")
    ));
    response
}

fn eligibility_response(schemes: &[SchemeRecord]) -> String {
    let mut response = String::from("Here are the eligibility criteria for relevant schemes:\n\n");
    for (i, scheme) in schemes.iter().take(3).enumerate() {
        response.push_str(&format!("{}. {}\n", i + 1, scheme.title));
        if let Some(eligibility) = &scheme.eligibility_criteria {
            response.push_str(&format!(
                "   Eligibility: {}\n\n",
                truncate(eligibility, LONG_TRUNCATE)
            ));
        }
    }
    response
}

fn application_response(schemes: &[SchemeRecord]) -> String {
    let mut response = String::from("Here's how to apply for relevant schemes:\n\n");
    for (i, scheme) in schemes.iter().take(3).enumerate() {
        response.push_str(&format!("{}. {}\n", i + 1, scheme.title));
        if let Some(process) = &scheme.application_process {
            response.push_str(&format!("   Process: {}\n", truncate(process, LONG_TRUNCATE)));
        }
        if let Some(link) = &scheme.application_link {
            response.push_str(&format!("   Apply online: {link}\n\n"));
        }
    }
    response
}

fn benefits_response(schemes: &[SchemeRecord]) -> String {
    let mut response = String::from("Here are the benefits of relevant schemes:\n\n");
    for (i, scheme) in schemes.iter().take(3).enumerate() {
        response.push_str(&format!("{}. {}\n", i + 1, scheme.title));
        if let Some(benefits) = &scheme.benefits {
            response.push_str(&format!(
                "   Benefits: {}\n\n",
                truncate(benefits, LONG_TRUNCATE)
            ));
        }
    }
    response
}

fn general_response(schemes: &[SchemeRecord]) -> String {
    let mut response = format!("I found {} relevant scheme(s) for your query:\n\n", schemes.len());
    for (i, scheme) in schemes.iter().take(5).enumerate() {
        response.push_str(&format!("{}. {}\n", i + 1, scheme.title));
        response.push_str(&format!("   Sector: {}\n", scheme.sector.display_name()));
        response.push_str(&format!(
            "   Description: {}\n",
            truncate(&scheme.short_description, SHORT_TRUNCATE)
        ));
        if let Some(ministry) = &scheme.ministry {
            response.push_str(&format!("   Ministry: {ministry}\n"));
        }
        response.push_str(&format!(
            "   More info: {}\n\n",
            scheme.source_url.as_deref().unwrap_or("N/A")
        ));
    }
    response
}

fn greeting_text(language: Language) -> &'static str {
    match language {
        Language::Hi => {
            "नमस्ते! मैं आपका सरकारी योजना सहायक हूं। मैं आपको विभिन्न सरकारी योजनाओं के बारे में जानकारी देने में मदद कर सकता हूं। आप क्या जानना चाहते हैं?"
        }
        Language::Kn => {
            "ನಮಸ್ಕಾರ! ನಾನು ನಿಮ್ಮ ಸರ್ಕಾರಿ ಯೋಜನೆ ಸಹಾಯಕ. ನಾನು ವಿವಿಧ ಸರ್ಕಾರಿ ಯೋಜನೆಗಳ ಬಗ್ಗೆ ಮಾಹಿತಿ ನೀಡಲು ನಿಮಗೆ ಸಹಾಯ ಮಾಡಬಹುದು. ನೀವು ಏನು ತಿಳಿಯಲು ಬಯಸುತ್ತೀರಿ?"
        }
        _ => {
            "Hello! I'm your Government Scheme Assistant. I can help you find information about various government schemes. What would you like to know?"
        }
    }
}

fn help_text(language: Language) -> &'static str {
    match language {
        Language::Hi => {
            "मैं आपकी इन चीजों में मदद कर सकता हूं:\n• क्षेत्र के अनुसार सरकारी योजनाएं खोजना (कृषि, स्वास्थ्य, शिक्षा, रोजगार)\n• पात्रता मानदंड जांचना\n• लाभ और आवेदन प्रक्रिया समझना\n• योजना विवरण और संपर्क जानकारी प्राप्त करना\n\nबस किसी भी योजना या विषय के बारे में पूछें!"
        }
        Language::Kn => {
            "ನಾನು ನಿಮಗೆ ಇವುಗಳಲ್ಲಿ ಸಹಾಯ ಮಾಡಬಹುದು:\n• ಕ್ಷೇತ್ರದ ಪ್ರಕಾರ ಸರ್ಕಾರಿ ಯೋಜನೆಗಳನ್ನು ಹುಡುಕುವುದು (ಕೃಷಿ, ಆರೋಗ್ಯ, ಶಿಕ್ಷಣ, ಉದ್ಯೋಗ)\n• ಅರ್ಹತಾ ಮಾನದಂಡಗಳನ್ನು ಪರಿಶೀಲಿಸುವುದು\n• ಪ್ರಯೋಜನಗಳು ಮತ್ತು ಅರ್ಜಿ ಪ್ರಕ್ರಿಯೆಯನ್ನು ಅರ್ಥಮಾಡಿಕೊಳ್ಳುವುದು\n• ಯೋಜನೆ ವಿವರಗಳು ಮತ್ತು ಸಂಪರ್ಕ ಮಾಹಿತಿ ಪಡೆಯುವುದು\n\nಯಾವುದೇ ಯೋಜನೆ ಅಥವಾ ವಿಷಯದ ಬಗ್ಗೆ ಕೇಳಿ!"
        }
        _ => {
            "I can help you with:\n• Finding government schemes by sector (agriculture, health, education, employment)\n• Checking eligibility criteria\n• Understanding benefits and application process\n• Getting scheme details and contact information\n\nJust ask me about any scheme or topic!"
        }
    }
}

pub(crate) fn no_results_text(language: Language) -> &'static str {
    match language {
        Language::Hi => {
            "मुझे आपके प्रश्न से मेल खाने वाली कोई योजना नहीं मिली। कृपया अपना प्रश्न दोबारा पूछें या कृषि, स्वास्थ्य, शिक्षा या रोजगार जैसे किसी विशिष्ट क्षेत्र के बारे में पूछें।"
        }
        Language::Kn => {
            "ನಿಮ್ಮ ಪ್ರಶ್ನೆಗೆ ಹೊಂದಾಣಿಕೆಯಾಗುವ ಯಾವುದೇ ಯೋಜನೆಗಳು ನನಗೆ ಸಿಗಲಿಲ್ಲ. ದಯವಿಟ್ಟು ನಿಮ್ಮ ಪ್ರಶ್ನೆಯನ್ನು ಮತ್ತೆ ಕೇಳಿ ಅಥವಾ ಕೃಷಿ, ಆರೋಗ್ಯ, ಶಿಕ್ಷಣ ಅಥವಾ ಉದ್ಯೋಗದಂತಹ ನಿರ್ದಿಷ್ಟ ಕ್ಷೇತ್ರದ ಬಗ್ಗೆ ಕೇಳಿ."
        }
        _ => {
            "I couldn't find any schemes matching your query. Please try rephrasing your question or ask about a specific sector like agriculture, health, education, or employment."
        }
    }
}

pub(crate) fn error_text(language: Language) -> &'static str {
    match language {
        Language::Hi => {
            "मुझे खेद है, आपके अनुरोध को संसाधित करने में त्रुटि आई। कृपया पुनः प्रयास करें या अपना प्रश्न दोबारा पूछें।"
        }
        Language::Kn => {
            "ಕ್ಷಮಿಸಿ, ನಿಮ್ಮ ವಿನಂತಿಯನ್ನು ಸಂಸ್ಕರಿಸುವಾಗ ದೋಷ ಸಂಭವಿಸಿದೆ. ದಯವಿಟ್ಟು ಮತ್ತೆ ಪ್ರಯತ್ನಿಸಿ ಅಥವಾ ನಿಮ್ಮ ಪ್ರಶ್ನೆಯನ್ನು ಮತ್ತೆ ಕೇಳಿ."
        }
        _ => {
            "I'm sorry, I encountered an error processing your request. Please try again or rephrase your question."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yojana_core::types::Sector;

    fn scheme(title: &str) -> SchemeRecord {
        SchemeRecord {
            id: "s1".into(),
            title: title.into(),
            description: "A support scheme".into(),
            short_description: "Support for farmers".into(),
            sector: Sector::Agriculture,
            government_level: Default::default(),
            state: None,
            ministry: Some("Ministry of Agriculture".into()),
            department: None,
            eligibility_criteria: Some("Small and marginal farmers".into()),
            benefits: Some("6000 per year".into()),
            application_process: Some("Apply at the nearest CSC".into()),
            application_link: Some("https://pmkisan.gov.in".into()),
            launch_date: None,
            last_date: None,
            helpline_number: None,
            email: None,
            website: None,
            source_url: Some("https://pmkisan.gov.in".into()),
            keywords: vec!["farmer".into()],
            search_tags: vec![],
            is_active: true,
            language: Language::En,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_no_results_has_fixed_confidence() {
        let composer = ResponseComposer::new();
        let resp = composer.compose(Intent::SearchScheme, &[], Language::En);
        assert_eq!(resp.confidence, 0.5);
        assert_eq!(resp.scheme_count, 0);
        assert!(resp.text.starts_with("I couldn't find any schemes"));
    }

    #[test]
    fn test_no_results_falls_back_to_english() {
        let composer = ResponseComposer::new();
        let ta = composer.compose(Intent::SearchScheme, &[], Language::Ta);
        let en = composer.compose(Intent::SearchScheme, &[], Language::En);
        assert_eq!(ta.text, en.text);
    }

    #[test]
    fn test_greeting_ignores_schemes() {
        let composer = ResponseComposer::new();
        let resp = composer.compose(Intent::Greeting, &[scheme("PM Kisan")], Language::En);
        assert_eq!(resp.confidence, 0.8);
        assert!(resp.text.starts_with("Hello!"));
        assert!(!resp.text.contains("PM Kisan"));
    }

    #[test]
    fn test_greeting_in_kannada() {
        let composer = ResponseComposer::new();
        let resp = composer.compose(Intent::Greeting, &[scheme("PM Kisan")], Language::Kn);
        assert!(resp.text.starts_with("ನಮಸ್ಕಾರ"));
    }

    #[test]
    fn test_info_uses_only_first_scheme() {
        let composer = ResponseComposer::new();
        let schemes = [scheme("PM Kisan"), scheme("Ayushman Bharat")];
        let resp = composer.compose(Intent::GetInfo, &schemes, Language::En);
        assert!(resp.text.contains("PM Kisan"));
        assert!(!resp.text.contains("Ayushman Bharat"));
        assert_eq!(resp.scheme_count, 2);
    }

    #[test]
    fn test_info_missing_source_url_renders_na() {
        let composer = ResponseComposer::new();
        let mut s = scheme("PM Kisan");
        s.source_url = None;
        let resp = composer.compose(Intent::GetInfo, &[s], Language::En);
        assert!(resp.text.contains("For more details, visit: N/A"));
    }

    #[test]
    fn test_eligibility_enumerates_at_most_three() {
        let composer = ResponseComposer::new();
        let schemes = [scheme("A"), scheme("B"), scheme("C"), scheme("D")];
        let resp = composer.compose(Intent::Eligibility, &schemes, Language::En);
        assert!(resp.text.contains("3. C"));
        assert!(!resp.text.contains("4. D"));
    }

    #[test]
    fn test_eligibility_truncates_at_300_chars() {
        let composer = ResponseComposer::new();
        let mut s = scheme("Long");
        let long = "x".repeat(400);
        s.eligibility_criteria = Some(long.clone());
        let resp = composer.compose(Intent::Eligibility, &[s], Language::En);
        let expected = format!("{}...", &long[..300]);
        assert!(resp.text.contains(&expected));
        assert!(!resp.text.contains(&long[..301]));
    }

    #[test]
    fn test_general_lists_up_to_five() {
        let composer = ResponseComposer::new();
        let schemes: Vec<SchemeRecord> = (0..7).map(|i| scheme(&format!("Scheme{i}"))).collect();
        let resp = composer.compose(Intent::GeneralQuery, &schemes, Language::En);
        assert!(resp.text.starts_with("I found 7 relevant scheme(s)"));
        assert!(resp.text.contains("5. Scheme4"));
        assert!(!resp.text.contains("6. Scheme5"));
    }

    #[test]
    fn test_truncate_is_char_based() {
        let truncated = truncate("ಕೃಷಿ ಯೋಜನೆ", 4);
        assert_eq!(truncated, "ಕೃಷಿ...");
    }
}
