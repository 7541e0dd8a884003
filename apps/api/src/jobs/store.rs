//! Job and company persistence. The structured description is derived here,
//! on the write path: computed from the incoming description and attached
//! only when the row does not already carry one.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::fetchers::FetchedJob;
use crate::models::company::CompanyRow;
use crate::models::job::JobRow;
use crate::structured::structure_description;

/// Upserts one fetched posting keyed on `(platform, external_job_id)`.
///
/// On conflict the source fields refresh and the row reactivates, but the
/// stored structured description and first-seen company logo win over the
/// newly computed values — derivation happens once per job, not per fetch.
pub async fn upsert_fetched_job(
    db: &PgPool,
    company: &CompanyRow,
    platform: &str,
    job: &FetchedJob,
) -> Result<Uuid, AppError> {
    let structured = structure_description(job.description.as_deref());
    // All-or-nothing: an empty result is stored as NULL, never as `{}`.
    let structured_json = if structured.is_empty() {
        None
    } else {
        serde_json::to_value(&structured).ok()
    };
    let apply_url = job
        .apply_url
        .clone()
        .unwrap_or_else(|| job.external_job_id.clone());

    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO jobs
            (company_id, title, location, description, apply_url, platform,
             external_job_id, posted_at, is_active, raw, company_logo,
             structured_description, fetched_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, $9, $10, $11, now())
        ON CONFLICT (platform, external_job_id) DO UPDATE SET
            title = EXCLUDED.title,
            location = EXCLUDED.location,
            description = EXCLUDED.description,
            apply_url = EXCLUDED.apply_url,
            posted_at = EXCLUDED.posted_at,
            raw = EXCLUDED.raw,
            is_active = TRUE,
            fetched_at = now(),
            company_logo = COALESCE(jobs.company_logo, EXCLUDED.company_logo),
            structured_description =
                COALESCE(jobs.structured_description, EXCLUDED.structured_description)
        RETURNING id
        "#,
    )
    .bind(company.id)
    .bind(&job.title)
    .bind(&job.location)
    .bind(&job.description)
    .bind(apply_url)
    .bind(platform)
    .bind(&job.external_job_id)
    .bind(job.posted_at)
    .bind(&job.raw)
    .bind(&company.logo)
    .bind(structured_json)
    .fetch_one(db)
    .await?;

    Ok(id)
}

/// Marks jobs of a company+platform inactive when the latest fetch no
/// longer lists them. A fetch that returned nothing leaves rows untouched —
/// an empty batch is indistinguishable from a source hiccup.
pub async fn deactivate_missing(
    db: &PgPool,
    company_id: Uuid,
    platform: &str,
    found_ids: &[String],
) -> Result<u64, AppError> {
    if found_ids.is_empty() {
        return Ok(0);
    }
    let result = sqlx::query(
        r#"
        UPDATE jobs SET is_active = FALSE
        WHERE company_id = $1 AND platform = $2 AND is_active
          AND external_job_id <> ALL($3)
        "#,
    )
    .bind(company_id)
    .bind(platform)
    .bind(found_ids)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

pub async fn list_companies(db: &PgPool) -> Result<Vec<CompanyRow>, AppError> {
    let companies = sqlx::query_as("SELECT * FROM companies ORDER BY name")
        .fetch_all(db)
        .await?;
    Ok(companies)
}

/// Companies that currently have at least one active job, name order.
pub async fn companies_with_active_jobs(db: &PgPool) -> Result<Vec<CompanyRow>, AppError> {
    let companies = sqlx::query_as(
        r#"
        SELECT DISTINCT c.* FROM companies c
        JOIN jobs j ON j.company_id = c.id
        WHERE j.is_active
        ORDER BY c.name
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(companies)
}

/// Every active job, newest first.
pub async fn active_jobs(db: &PgPool) -> Result<Vec<JobRow>, AppError> {
    let jobs = sqlx::query_as(
        "SELECT * FROM jobs WHERE is_active ORDER BY posted_at DESC NULLS LAST, fetched_at DESC",
    )
    .fetch_all(db)
    .await?;
    Ok(jobs)
}

pub async fn insert_company(
    db: &PgPool,
    name: &str,
    domain: Option<&str>,
    logo: Option<&str>,
    platform: Option<&str>,
    handle: Option<&str>,
    board_url: Option<&str>,
) -> Result<CompanyRow, AppError> {
    let company = sqlx::query_as(
        r#"
        INSERT INTO companies (name, domain, logo, platform, handle, board_url)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(domain)
    .bind(logo)
    .bind(platform)
    .bind(handle)
    .bind(board_url)
    .fetch_one(db)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Validation(format!("company '{name}' is already registered"))
        }
        _ => AppError::Database(e),
    })?;
    Ok(company)
}
