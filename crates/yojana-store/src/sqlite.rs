//! SQLite scheme catalog.
//!
//! Natural order is insertion order (rowid). Text clauses are
//! case-insensitive substring checks via `instr` over lowered columns;
//! keyword/tag lists are stored as JSON text, so an element match is a
//! substring check against the serialized list.

use async_trait::async_trait;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

use yojana_core::error::{Result, YojanaError};
use yojana_core::traits::SchemeStore;
use yojana_core::types::{
    AdvancedQuery, GovernmentLevel, Language, PresenceField, SchemeQuery, SchemeRecord, Sector,
    SortOrder, StoreStatistics,
};

const SCHEME_COLUMNS: &str = "id, title, description, short_description, sector, \
     government_level, state, ministry, department, eligibility_criteria, benefits, \
     application_process, application_link, launch_date, last_date, helpline_number, \
     email, website, source_url, keywords, search_tags, is_active, language, created_at";

pub struct SqliteSchemeStore {
    conn: Mutex<Connection>,
}

fn store_err(e: impl std::fmt::Display) -> YojanaError {
    YojanaError::Store(e.to_string())
}

impl SqliteSchemeStore {
    /// Open (or create) the catalog at the given path.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path).map_err(store_err)?;
        Self::from_connection(conn)
    }

    /// In-memory catalog for tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(store_err)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schemes (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                short_description TEXT NOT NULL DEFAULT '',
                sector TEXT NOT NULL,
                government_level TEXT NOT NULL DEFAULT 'central',
                state TEXT,
                ministry TEXT,
                department TEXT,
                eligibility_criteria TEXT,
                benefits TEXT,
                application_process TEXT,
                application_link TEXT,
                launch_date TEXT,
                last_date TEXT,
                helpline_number TEXT,
                email TEXT,
                website TEXT,
                source_url TEXT,
                keywords TEXT NOT NULL DEFAULT '[]',
                search_tags TEXT NOT NULL DEFAULT '[]',
                is_active INTEGER NOT NULL DEFAULT 1,
                language TEXT NOT NULL DEFAULT 'en',
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_schemes_sector ON schemes(sector);
            CREATE INDEX IF NOT EXISTS idx_schemes_active ON schemes(is_active);",
        )
        .map_err(store_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(store_err)
    }
}

fn row_to_scheme(row: &rusqlite::Row<'_>) -> rusqlite::Result<SchemeRecord> {
    let sector: String = row.get(4)?;
    let level: String = row.get(5)?;
    let keywords: String = row.get(19)?;
    let search_tags: String = row.get(20)?;
    let language: String = row.get(22)?;
    let created_at: String = row.get(23)?;
    Ok(SchemeRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        short_description: row.get(3)?,
        sector: Sector::from_code(&sector),
        government_level: match level.as_str() {
            "state" => GovernmentLevel::State,
            "local" => GovernmentLevel::Local,
            _ => GovernmentLevel::Central,
        },
        state: row.get(6)?,
        ministry: row.get(7)?,
        department: row.get(8)?,
        eligibility_criteria: row.get(9)?,
        benefits: row.get(10)?,
        application_process: row.get(11)?,
        application_link: row.get(12)?,
        launch_date: row.get(13)?,
        last_date: row.get(14)?,
        helpline_number: row.get(15)?,
        email: row.get(16)?,
        website: row.get(17)?,
        source_url: row.get(18)?,
        keywords: serde_json::from_str(&keywords).unwrap_or_default(),
        search_tags: serde_json::from_str(&search_tags).unwrap_or_default(),
        is_active: row.get::<_, i64>(21)? != 0,
        language: Language::from_code(&language),
        created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
            .map(|d| d.with_timezone(&chrono::Utc))
            .unwrap_or_default(),
    })
}

/// One OR-group of substring checks for a single term across the given
/// columns. Each column consumes one bound parameter (the lowered term).
fn term_clause(columns: &[&str]) -> String {
    let checks: Vec<String> = columns
        .iter()
        .map(|c| format!("instr(lower(coalesce({c}, '')), ?) > 0"))
        .collect();
    format!("({})", checks.join(" OR "))
}

fn presence_column(field: PresenceField) -> &'static str {
    match field {
        PresenceField::EligibilityCriteria => "eligibility_criteria",
        PresenceField::ApplicationProcess => "application_process",
        PresenceField::Benefits => "benefits",
    }
}

#[async_trait]
impl SchemeStore for SqliteSchemeStore {
    async fn find_active_matching(&self, query: &SchemeQuery) -> Result<Vec<SchemeRecord>> {
        let conn = self.lock()?;
        let mut sql = format!("SELECT {SCHEME_COLUMNS} FROM schemes WHERE is_active = 1");
        let mut params: Vec<String> = Vec::new();

        if !query.sectors.is_empty() {
            let placeholders = vec!["?"; query.sectors.len()].join(", ");
            sql.push_str(&format!(" AND sector IN ({placeholders})"));
            params.extend(query.sectors.iter().map(|s| s.as_str().to_string()));
        }

        let text_columns = ["title", "description", "keywords", "search_tags"];
        if !query.text_any.is_empty() {
            let groups: Vec<String> = query
                .text_any
                .iter()
                .map(|_| term_clause(&text_columns))
                .collect();
            sql.push_str(&format!(" AND ({})", groups.join(" OR ")));
            for term in &query.text_any {
                let lowered = term.to_lowercase();
                for _ in 0..text_columns.len() {
                    params.push(lowered.clone());
                }
            }
        }

        if let Some(field) = query.require {
            let col = presence_column(field);
            sql.push_str(&format!(" AND {col} IS NOT NULL AND {col} != ''"));
        }

        sql.push_str(&format!(" ORDER BY rowid LIMIT {}", query.limit.max(1)));

        let mut stmt = conn.prepare(&sql).map_err(store_err)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), row_to_scheme)
            .map_err(store_err)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    async fn advanced_search(&self, query: &AdvancedQuery) -> Result<Vec<SchemeRecord>> {
        let conn = self.lock()?;
        let mut sql = format!("SELECT {SCHEME_COLUMNS} FROM schemes WHERE is_active = 1");
        let mut params: Vec<String> = Vec::new();

        if let Some(sector) = &query.sector {
            sql.push_str(" AND instr(lower(sector), ?) > 0");
            params.push(sector.to_lowercase());
        }

        if let Some(ministry) = &query.ministry {
            sql.push_str(" AND instr(lower(coalesce(ministry, '')), ?) > 0");
            params.push(ministry.to_lowercase());
        }

        if let Some(eligibility) = &query.eligibility {
            let words: Vec<&str> = eligibility.split_whitespace().collect();
            if !words.is_empty() {
                let checks =
                    vec!["instr(lower(coalesce(eligibility_criteria, '')), ?) > 0"; words.len()];
                sql.push_str(&format!(" AND ({})", checks.join(" OR ")));
                params.extend(words.iter().map(|w| w.to_lowercase()));
            }
        }

        let text_columns = [
            "title",
            "description",
            "short_description",
            "keywords",
            "search_tags",
            "benefits",
        ];
        if !query.keywords.is_empty() {
            let groups: Vec<String> = query
                .keywords
                .iter()
                .map(|_| term_clause(&text_columns))
                .collect();
            sql.push_str(&format!(" AND ({})", groups.join(" OR ")));
            for term in &query.keywords {
                let lowered = term.to_lowercase();
                for _ in 0..text_columns.len() {
                    params.push(lowered.clone());
                }
            }
        }

        let order = match query.sort {
            SortOrder::Relevance => "rowid",
            SortOrder::Alphabetical => "title COLLATE NOCASE ASC",
            SortOrder::Newest => "created_at DESC",
            SortOrder::Oldest => "created_at ASC",
        };
        sql.push_str(&format!(" ORDER BY {order} LIMIT {}", query.limit.max(1)));

        let mut stmt = conn.prepare(&sql).map_err(store_err)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), row_to_scheme)
            .map_err(store_err)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    async fn find_by_sector(&self, sector: Sector) -> Result<Vec<SchemeRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {SCHEME_COLUMNS} FROM schemes \
                 WHERE sector = ?1 AND is_active = 1 ORDER BY rowid"
            ))
            .map_err(store_err)?;
        let rows = stmt
            .query_map(rusqlite::params![sector.as_str()], row_to_scheme)
            .map_err(store_err)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<SchemeRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {SCHEME_COLUMNS} FROM schemes WHERE id = ?1"
            ))
            .map_err(store_err)?;
        Ok(stmt.query_row(rusqlite::params![id], row_to_scheme).ok())
    }

    async fn insert(&self, scheme: &SchemeRecord) -> Result<()> {
        if scheme.title.trim().is_empty() {
            return Err(YojanaError::Store("scheme title must not be empty".into()));
        }
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO schemes (
                id, title, description, short_description, sector, government_level,
                state, ministry, department, eligibility_criteria, benefits,
                application_process, application_link, launch_date, last_date,
                helpline_number, email, website, source_url, keywords, search_tags,
                is_active, language, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                      ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24)",
            rusqlite::params![
                scheme.id,
                scheme.title,
                scheme.description,
                scheme.short_description,
                scheme.sector.as_str(),
                scheme.government_level.as_str(),
                scheme.state,
                scheme.ministry,
                scheme.department,
                scheme.eligibility_criteria,
                scheme.benefits,
                scheme.application_process,
                scheme.application_link,
                scheme.launch_date,
                scheme.last_date,
                scheme.helpline_number,
                scheme.email,
                scheme.website,
                scheme.source_url,
                serde_json::to_string(&scheme.keywords)?,
                serde_json::to_string(&scheme.search_tags)?,
                scheme.is_active as i64,
                scheme.language.as_str(),
                scheme.created_at.to_rfc3339(),
            ],
        )
        .map_err(store_err)?;
        Ok(())
    }

    async fn statistics(&self) -> Result<StoreStatistics> {
        let conn = self.lock()?;
        let total: i64 = conn
            .query_row("SELECT COUNT(*) FROM schemes", [], |r| r.get(0))
            .map_err(store_err)?;
        let active: i64 = conn
            .query_row("SELECT COUNT(*) FROM schemes WHERE is_active = 1", [], |r| {
                r.get(0)
            })
            .map_err(store_err)?;
        let mut stmt = conn
            .prepare(
                "SELECT sector, COUNT(*) FROM schemes WHERE is_active = 1 \
                 GROUP BY sector ORDER BY sector",
            )
            .map_err(store_err)?;
        let sectors = stmt
            .query_map([], |row| {
                let code: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((Sector::from_code(&code), count as u64))
            })
            .map_err(store_err)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(StoreStatistics {
            total_schemes: total as u64,
            active_schemes: active as u64,
            sectors,
        })
    }
}
