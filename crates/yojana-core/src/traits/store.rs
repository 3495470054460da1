//! Scheme store contract — the persistent scheme catalog, read-only to the
//! assistant. Writes happen through the import path only.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AdvancedQuery, SchemeQuery, SchemeRecord, Sector, StoreStatistics};

#[async_trait]
pub trait SchemeStore: Send + Sync {
    /// Find active schemes matching the filter, in the store's natural
    /// order, capped at `query.limit`.
    async fn find_active_matching(&self, query: &SchemeQuery) -> Result<Vec<SchemeRecord>>;

    /// Parameterized search with independent optional filters and a
    /// selectable ordering.
    async fn advanced_search(&self, query: &AdvancedQuery) -> Result<Vec<SchemeRecord>>;

    /// All active schemes in a sector.
    async fn find_by_sector(&self, sector: Sector) -> Result<Vec<SchemeRecord>>;

    /// Look up a single scheme by id.
    async fn get_by_id(&self, id: &str) -> Result<Option<SchemeRecord>>;

    /// Insert a scheme record. Rejects records with an empty title.
    async fn insert(&self, scheme: &SchemeRecord) -> Result<()>;

    /// Catalog statistics: total/active counts and active counts per sector.
    async fn statistics(&self) -> Result<StoreStatistics>;
}
