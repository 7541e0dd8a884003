//! Job search — optional title/description, country, and recency filters
//! over active jobs, with page/num_pages pagination.
//!
//! `num_pages` is the page-size parameter name inherited from the public
//! API contract; renaming it would break existing clients.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::company::CompanyOut;

const DEFAULT_PAGE_SIZE: i64 = 20;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub date_posted: Option<String>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub num_pages: Option<i64>,
}

impl SearchParams {
    fn query_term(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    fn country_term(&self) -> Option<String> {
        self.country
            .as_deref()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
    }

    fn date_posted_term(&self) -> String {
        self.date_posted
            .as_deref()
            .map(|d| d.trim().to_lowercase())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "all".to_string())
    }

    fn requested_page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    fn page_size(&self) -> i64 {
        self.num_pages.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub pagination: Pagination,
    pub filters: FiltersEcho,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub num_pages: i64,
    pub total_pages: i64,
    pub total_results: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

#[derive(Debug, Serialize)]
pub struct FiltersEcho {
    pub query: String,
    pub country: String,
    pub date_posted: String,
}

/// One search result: job fields with the company nested.
#[derive(Debug, Serialize)]
pub struct SearchHit {
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
    pub company_logo: Option<String>,
    pub structured_description: Option<Value>,
    pub company: CompanyOut,
}

#[derive(Debug, sqlx::FromRow)]
struct SearchRow {
    id: Uuid,
    title: String,
    location: Option<String>,
    location_country: Option<String>,
    description: Option<String>,
    apply_url: Option<String>,
    platform: String,
    external_job_id: String,
    posted_at: Option<DateTime<Utc>>,
    fetched_at: DateTime<Utc>,
    company_logo: Option<String>,
    structured_description: Option<Value>,
    company_id: Uuid,
    company_name: String,
    company_logo_url: Option<String>,
    company_platform: Option<String>,
}

impl From<SearchRow> for SearchHit {
    fn from(row: SearchRow) -> Self {
        SearchHit {
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
            company_logo: row.company_logo,
            structured_description: row.structured_description,
            company: CompanyOut {
                id: row.company_id,
                name: row.company_name,
                logo: row.company_logo_url,
                platform: row.company_platform,
            },
        }
    }
}

/// Cutoff timestamp for a `date_posted` filter value; `all` (and anything
/// unrecognized) means no cutoff.
fn date_cutoff(now: DateTime<Utc>, date_posted: &str) -> Option<DateTime<Utc>> {
    match date_posted {
        "today" => now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|start| start.and_utc()),
        "week" => Some(now - Duration::days(7)),
        "month" => Some(now - Duration::days(30)),
        _ => None,
    }
}

fn page_count(total_results: i64, page_size: i64) -> i64 {
    ((total_results + page_size - 1) / page_size).max(1)
}

fn push_filters(
    builder: &mut QueryBuilder<'_, Postgres>,
    query: Option<&str>,
    country: Option<&str>,
    cutoff: Option<DateTime<Utc>>,
) {
    if let Some(q) = query {
        let pattern = format!("%{q}%");
        builder
            .push(" AND (j.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR j.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(c) = country {
        builder
            .push(" AND (j.location_country ILIKE ")
            .push_bind(c.to_string())
            .push(" OR j.location ILIKE ")
            .push_bind(format!("%{c}%"))
            .push(")");
    }
    if let Some(cutoff) = cutoff {
        builder.push(" AND j.posted_at >= ").push_bind(cutoff);
    }
}

/// Runs a search. A requested page past the end falls back to page 1 rather
/// than erroring, mirroring the behavior clients already depend on.
pub async fn run_search(db: &PgPool, params: &SearchParams) -> Result<SearchResponse, AppError> {
    let query = params.query_term();
    let country = params.country_term();
    let date_posted = params.date_posted_term();
    let cutoff = date_cutoff(Utc::now(), &date_posted);
    let page_size = params.page_size();

    let mut count_builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(
        "SELECT COUNT(*) FROM jobs j WHERE j.is_active = TRUE",
    );
    push_filters(&mut count_builder, query, country.as_deref(), cutoff);
    let (total_results,): (i64,) = count_builder.build_query_as().fetch_one(db).await?;

    let total_pages = page_count(total_results, page_size);
    let mut page = params.requested_page();
    if page > total_pages {
        page = 1;
    }
    let offset = (page - 1) * page_size;

    let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(
        r#"
        SELECT j.id, j.title, j.location, j.location_country, j.description,
               j.apply_url, j.platform, j.external_job_id, j.posted_at,
               j.fetched_at, j.company_logo, j.structured_description,
               c.id AS company_id, c.name AS company_name,
               c.logo AS company_logo_url, c.platform AS company_platform
        FROM jobs j
        JOIN companies c ON c.id = j.company_id
        WHERE j.is_active = TRUE
        "#,
    );
    push_filters(&mut builder, query, country.as_deref(), cutoff);
    builder.push(" ORDER BY j.posted_at DESC NULLS LAST, j.fetched_at DESC");
    builder.push(" LIMIT ").push_bind(page_size);
    builder.push(" OFFSET ").push_bind(offset);

    let rows: Vec<SearchRow> = builder.build_query_as().fetch_all(db).await?;

    Ok(SearchResponse {
        results: rows.into_iter().map(SearchHit::from).collect(),
        pagination: Pagination {
            page,
            num_pages: page_size,
            total_pages,
            total_results,
            has_next: page < total_pages,
            has_previous: page > 1,
        },
        filters: FiltersEcho {
            query: query.unwrap_or_default().to_string(),
            country: country.unwrap_or_default(),
            date_posted,
        },
    })
}
