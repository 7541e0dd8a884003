use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered company whose board is polled on refresh.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyRow {
    pub id: Uuid,
    pub name: String,
    /// Optional domain, useful for enrichment and logo lookup.
    pub domain: Option<String>,
    pub logo: Option<String>,
    /// Primary ATS platform (greenhouse, lever, ashby, ...).
    pub platform: Option<String>,
    /// Board slug on the ATS platform.
    pub handle: Option<String>,
    /// Feed or listing URL for rss / career_page sources.
    pub board_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Company shape nested inside job payloads.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyOut {
    pub id: Uuid,
    pub name: String,
    pub logo: Option<String>,
    pub platform: Option<String>,
}

impl From<&CompanyRow> for CompanyOut {
    fn from(row: &CompanyRow) -> Self {
        CompanyOut {
            id: row.id,
            name: row.name.clone(),
            logo: row.logo.clone(),
            platform: row.platform.clone(),
        }
    }
}
