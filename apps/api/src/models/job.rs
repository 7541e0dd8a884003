use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A stored job posting. `(platform, external_job_id)` is unique; rows are
/// upserted on every refresh and flipped inactive when a board stops
/// listing them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub location: Option<String>,
    pub location_country: Option<String>,
    pub description: Option<String>,
    pub apply_url: Option<String>,
    /// Source platform (greenhouse, lever, ashby, workable, ...).
    pub platform: String,
    /// Job ID from the external platform.
    pub external_job_id: String,
    pub posted_at: Option<DateTime<Utc>>,
    pub fetched_at: DateTime<Utc>,
    pub is_active: bool,
    /// Raw source payload, kept for debugging and enrichment.
    pub raw: Option<Value>,
    /// Company logo captured at fetch time.
    pub company_logo: Option<String>,
    /// Structured fields derived from `description` at first write.
    pub structured_description: Option<Value>,
}

/// Job shape served by the API. Omits `raw`.
#[derive(Debug, Clone, Serialize)]
pub struct JobOut {
    pub id: Uuid,
    pub title: String,
    pub location: Option<String>,
    pub location_country: Option<String>,
    pub description: Option<String>,
    pub apply_url: Option<String>,
    pub platform: String,
    pub external_job_id: String,
    pub posted_at: Option<DateTime<Utc>>,
    pub fetched_at: DateTime<Utc>,
    pub is_active: bool,
    pub company_logo: Option<String>,
    pub structured_description: Option<Value>,
}

impl From<JobRow> for JobOut {
    fn from(row: JobRow) -> Self {
        JobOut {
            id: row.id,
            title: row.title,
            location: row.location,
            location_country: row.location_country,
            description: row.description,
            apply_url: row.apply_url,
            platform: row.platform,
            external_job_id: row.external_job_id,
            posted_at: row.posted_at,
            fetched_at: row.fetched_at,
            is_active: row.is_active,
            company_logo: row.company_logo,
            structured_description: row.structured_description,
        }
    }
}
