//! Keyword extraction — stopword filtering with a scheme-alias override.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Known multi-word scheme names and abbreviations. A query containing one
/// of these returns that phrase as the single atomic keyword, skipping
/// tokenization entirely so the alias is never split apart.
const SCHEME_ALIASES: &[&str] = &["pradhan mantri awas yojana", "pmay", "awas yojana"];

/// Common English function words dropped during extraction.
static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
        "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
        "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
        "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
        "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
        "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
        "for", "with", "through", "during", "before", "after", "above", "below", "up", "down",
        "in", "out", "on", "off", "over", "under", "again", "further", "then", "once", "here",
        "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
        "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
        "too", "very", "can", "will", "just", "should", "now", "please", "thank", "thanks",
    ]
    .into_iter()
    .collect()
});

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("word pattern"));

const MAX_KEYWORDS: usize = 10;
const MIN_TOKEN_LEN: usize = 3;

/// Extracts search keywords from free-text queries.
#[derive(Default)]
pub struct KeywordExtractor;

impl KeywordExtractor {
    pub fn new() -> Self {
        Self
    }

    /// At most 10 lower-cased tokens in query order, stopwords and tokens
    /// shorter than 3 characters removed. A recognized scheme alias
    /// short-circuits to a single-element result.
    pub fn extract(&self, query: &str) -> Vec<String> {
        let query_lower = query.to_lowercase();

        for alias in SCHEME_ALIASES {
            if query_lower.contains(alias) {
                return vec![alias.to_string()];
            }
        }

        WORD.find_iter(&query_lower)
            .map(|m| m.as_str().to_string())
            .filter(|w| w.chars().count() >= MIN_TOKEN_LEN && !STOPWORDS.contains(w.as_str()))
            .take(MAX_KEYWORDS)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_short_circuit() {
        let k = KeywordExtractor::new();
        assert_eq!(
            k.extract("tell me about Pradhan Mantri Awas Yojana please"),
            vec!["pradhan mantri awas yojana"]
        );
        assert_eq!(k.extract("what is PMAY?"), vec!["pmay"]);
    }

    #[test]
    fn test_alias_wins_regardless_of_surroundings() {
        let k = KeywordExtractor::new();
        let out = k.extract("agriculture health education awas yojana employment");
        assert_eq!(out, vec!["awas yojana"]);
    }

    #[test]
    fn test_stopwords_and_short_tokens_dropped() {
        let k = KeywordExtractor::new();
        let out = k.extract("What are the schemes for an old ox in agriculture?");
        assert!(!out.iter().any(|w| w == "the" || w == "for" || w == "an"));
        // "ox" is shorter than 3 chars
        assert!(!out.iter().any(|w| w == "ox"));
        assert!(out.contains(&"schemes".to_string()));
        assert!(out.contains(&"agriculture".to_string()));
    }

    #[test]
    fn test_lowercased_and_capped_at_ten() {
        let k = KeywordExtractor::new();
        let out = k.extract(
            "Alpha Beta Gamma Delta Epsilon Zeta Eta Theta Iota Kappa Lambda Omicron",
        );
        assert_eq!(out.len(), 10);
        assert!(out.iter().all(|w| w.chars().all(|c| !c.is_uppercase())));
        assert_eq!(out[0], "alpha");
        assert_eq!(out[9], "kappa");
    }

    #[test]
    fn test_original_order_preserved() {
        let k = KeywordExtractor::new();
        let out = k.extract("pension scheme widow support");
        assert_eq!(out, vec!["pension", "scheme", "widow", "support"]);
    }

    #[test]
    fn test_empty_query_yields_no_keywords() {
        let k = KeywordExtractor::new();
        assert!(k.extract("").is_empty());
        assert!(k.extract("is a of the").is_empty());
    }
}
