//! Scheme matcher — turns NLU output into a store filter.

use std::sync::Arc;

use yojana_core::traits::SchemeStore;
use yojana_core::types::{Intent, PresenceField, SchemeQuery, SchemeRecord};
use yojana_nlu::QueryEntities;

/// Maximum schemes fetched per chatbot query.
const MATCH_LIMIT: usize = 10;

/// Builds a [`SchemeQuery`] from the classified query and runs it against
/// the store. Store failures degrade to an empty result so the caller can
/// still compose a no-results answer.
pub struct SchemeMatcher {
    store: Arc<dyn SchemeStore>,
}

impl SchemeMatcher {
    pub fn new(store: Arc<dyn SchemeStore>) -> Self {
        Self { store }
    }

    pub async fn find_relevant(
        &self,
        query: &str,
        keywords: &[String],
        entities: &QueryEntities,
        intent: Intent,
    ) -> Vec<SchemeRecord> {
        let filter = build_query(query, keywords, entities, intent);
        match self.store.find_active_matching(&filter).await {
            Ok(schemes) => {
                tracing::debug!(count = schemes.len(), intent = %intent, "matched schemes");
                schemes
            }
            Err(e) => {
                tracing::warn!("scheme search failed, returning no results: {e}");
                Vec::new()
            }
        }
    }
}

fn build_query(
    query: &str,
    keywords: &[String],
    entities: &QueryEntities,
    intent: Intent,
) -> SchemeQuery {
    // Keywords drive the text clause; a stopword-only query falls back to
    // its raw words so something still matches.
    let text_any = if keywords.is_empty() {
        query.to_lowercase().split_whitespace().map(str::to_string).collect()
    } else {
        keywords.to_vec()
    };

    let require = match intent {
        Intent::Eligibility => Some(PresenceField::EligibilityCriteria),
        Intent::Application => Some(PresenceField::ApplicationProcess),
        Intent::Benefits => Some(PresenceField::Benefits),
        _ => None,
    };

    SchemeQuery {
        sectors: entities.sectors.iter().copied().collect(),
        text_any,
        require,
        limit: MATCH_LIMIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yojana_core::error::{Result, YojanaError};
    use yojana_core::types::{AdvancedQuery, Sector, StoreStatistics};

    #[test]
    fn test_keywords_drive_text_clause() {
        let entities = QueryEntities::default();
        let q = build_query(
            "schemes for farmers",
            &["farmer".into(), "scheme".into()],
            &entities,
            Intent::SearchScheme,
        );
        assert_eq!(q.text_any, vec!["farmer", "scheme"]);
        assert_eq!(q.limit, 10);
        assert!(q.require.is_none());
    }

    #[test]
    fn test_raw_words_fallback_when_no_keywords() {
        let entities = QueryEntities::default();
        let q = build_query("How Are You", &[], &entities, Intent::GeneralQuery);
        assert_eq!(q.text_any, vec!["how", "are", "you"]);
    }

    #[test]
    fn test_intent_presence_requirements() {
        let entities = QueryEntities::default();
        let e = build_query("x", &[], &entities, Intent::Eligibility);
        assert_eq!(e.require, Some(PresenceField::EligibilityCriteria));
        let a = build_query("x", &[], &entities, Intent::Application);
        assert_eq!(a.require, Some(PresenceField::ApplicationProcess));
        let b = build_query("x", &[], &entities, Intent::Benefits);
        assert_eq!(b.require, Some(PresenceField::Benefits));
        let g = build_query("x", &[], &entities, Intent::Greeting);
        assert!(g.require.is_none());
    }

    #[test]
    fn test_entity_sectors_carried_into_filter() {
        let mut entities = QueryEntities::default();
        entities.sectors.insert(Sector::Agriculture);
        let q = build_query("farmer support", &["farmer".into()], &entities, Intent::SearchScheme);
        assert_eq!(q.sectors, vec![Sector::Agriculture]);
    }

    struct FailingStore;

    #[async_trait::async_trait]
    impl SchemeStore for FailingStore {
        async fn find_active_matching(&self, _q: &SchemeQuery) -> Result<Vec<SchemeRecord>> {
            Err(YojanaError::Store("connection refused".into()))
        }
        async fn advanced_search(&self, _q: &AdvancedQuery) -> Result<Vec<SchemeRecord>> {
            Err(YojanaError::Store("connection refused".into()))
        }
        async fn find_by_sector(&self, _s: Sector) -> Result<Vec<SchemeRecord>> {
            Err(YojanaError::Store("connection refused".into()))
        }
        async fn get_by_id(&self, _id: &str) -> Result<Option<SchemeRecord>> {
            Err(YojanaError::Store("connection refused".into()))
        }
        async fn insert(&self, _s: &SchemeRecord) -> Result<()> {
            Err(YojanaError::Store("connection refused".into()))
        }
        async fn statistics(&self) -> Result<StoreStatistics> {
            Err(YojanaError::Store("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_store_failure_degrades_to_empty() {
        let matcher = SchemeMatcher::new(Arc::new(FailingStore));
        let schemes = matcher
            .find_relevant(
                "farmer schemes",
                &["farmer".into()],
                &QueryEntities::default(),
                Intent::SearchScheme,
            )
            .await;
        assert!(schemes.is_empty());
    }
}
