//! Regex-table intent classification.
//!
//! An ordered table of (intent, pattern list) pairs is evaluated top to
//! bottom against the lower-cased query; the first intent with a matching
//! pattern wins. Patterns within one intent are alternative surface forms
//! (English and Kannada), not distinct intents. Matching is unanchored
//! substring regex, no whole-word semantics.

use regex::Regex;
use yojana_core::types::Intent;

/// Ordered classification table. The table order is the tie-break contract:
/// a query matching several intents resolves to the earliest entry.
const INTENT_TABLE: &[(Intent, &[&str])] = &[
    (
        Intent::SearchScheme,
        &[
            r"scheme.*for",
            r"program.*for",
            r"yojana.*for",
            r"benefit.*for",
            r"help.*with",
            r"support.*for",
            r"ಯೋಜನೆ",
            r"ಕಾರ್ಯಕ್ರಮ",
            r"ಲಾಭ",
            r"ಸಹಾಯ",
            r"ಬೆಂಬಲ",
        ],
    ),
    (
        Intent::GetInfo,
        &[
            r"what.*is",
            r"tell.*about",
            r"information.*about",
            r"details.*of",
            r"explain",
            r"ಏನು",
            r"ಹೇಳಿ",
            r"ಮಾಹಿತಿ",
            r"ವಿವರ",
            r"ವಿವರಿಸಿ",
        ],
    ),
    (
        Intent::Eligibility,
        &[
            r"eligible",
            r"qualify",
            r"criteria",
            r"requirements",
            r"who.*can.*apply",
            r"ಅರ್ಹತೆ",
            r"ಅರ್ಹ",
            r"ನಿಯಮ",
            r"ಅವಶ್ಯಕತೆ",
            r"ಯಾರು.*ಅರ್ಜಿ",
        ],
    ),
    (
        Intent::Application,
        &[
            r"how.*to.*apply",
            r"apply.*for",
            r"application.*process",
            r"where.*to.*apply",
            r"documents.*required",
            r"ಎಲ್ಲಿ.*ಅರ್ಜಿ",
            r"ಅರ್ಜಿ.*ಹಾಕಿ",
            r"ಅರ್ಜಿ.*ಪ್ರಕ್ರಿಯೆ",
            r"ದಾಖಲೆ.*ಅವಶ್ಯಕ",
        ],
    ),
    (
        Intent::Benefits,
        &[
            r"benefits",
            r"advantages",
            r"what.*do.*i.*get",
            r"assistance",
            r"help.*provided",
            r"ಅನುಕೂಲ",
            r"ಏನು.*ಸಿಗುತ್ತದೆ",
            r"ಬೆಂಬಲ.*ನೀಡುತ್ತಾರೆ",
        ],
    ),
    (
        Intent::SectorSpecific,
        &[
            r"agriculture",
            r"health",
            r"education",
            r"employment",
            r"farmer",
            r"student",
            r"job",
            r"ಕೃಷಿ",
            r"ಆರೋಗ್ಯ",
            r"ಶಿಕ್ಷಣ",
            r"ಉದ್ಯೋಗ",
            r"ರೈತ",
            r"ವಿದ್ಯಾರ್ಥಿ",
            r"ಕೆಲಸ",
        ],
    ),
    (
        Intent::Greeting,
        &[
            r"hello",
            r"hi",
            r"good.*morning",
            r"good.*afternoon",
            r"good.*evening",
            r"ನಮಸ್ಕಾರ",
            r"ಹಲೋ",
            r"ಶುಭ.*ಬೆಳಿಗ್ಗೆ",
            r"ಶುಭ.*ಮಧ್ಯಾಹ್ನ",
            r"ಶುಭ.*ಸಂಜೆ",
        ],
    ),
    (
        Intent::Help,
        &[
            r"help",
            r"what.*can.*you.*do",
            r"how.*to.*use",
            r"commands",
            r"ಏನು.*ಮಾಡಬಹುದು",
            r"ಹೇಗೆ.*ಬಳಸುವುದು",
            r"ಆಜ್ಞೆಗಳು",
        ],
    ),
];

/// Classifies queries against the fixed pattern table.
pub struct IntentClassifier {
    table: Vec<(Intent, Vec<Regex>)>,
}

impl IntentClassifier {
    /// Compile the pattern table. The patterns are static literals, so a
    /// compile failure is a programming error.
    pub fn new() -> Self {
        let table = INTENT_TABLE
            .iter()
            .map(|(intent, patterns)| {
                let compiled = patterns
                    .iter()
                    .map(|p| Regex::new(p).unwrap_or_else(|e| panic!("bad intent pattern {p}: {e}")))
                    .collect();
                (*intent, compiled)
            })
            .collect();
        Self { table }
    }

    /// Classify a query. First matching intent in table order wins;
    /// no match falls back to `GeneralQuery`.
    pub fn classify(&self, query: &str) -> Intent {
        let query = query.to_lowercase();
        for (intent, patterns) in &self.table {
            for pattern in patterns {
                if pattern.is_match(&query) {
                    tracing::debug!(intent = %intent, pattern = %pattern, "intent matched");
                    return *intent;
                }
            }
        }
        Intent::GeneralQuery
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}
