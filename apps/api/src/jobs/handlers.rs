use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::errors::AppError;
use crate::fetchers::logo_url;
use crate::jobs::refresh::{refresh_all, RefreshSummary};
use crate::jobs::search::{run_search, SearchParams, SearchResponse};
use crate::jobs::store;
use crate::models::company::CompanyRow;
use crate::models::job::JobOut;
use crate::state::AppState;

/// One entry of the grouped listing: a company and its active jobs.
#[derive(Debug, Serialize)]
pub struct CompanyJobsResponse {
    pub id: Uuid,
    pub name: String,
    pub logo: Option<String>,
    pub platform: Option<String>,
    pub jobs: Vec<JobOut>,
}

/// GET /api/v1/jobs
///
/// Jobs grouped by company; only companies with at least one active job
/// appear.
pub async fn handle_jobs_grouped(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyJobsResponse>>, AppError> {
    let companies = store::companies_with_active_jobs(&state.db).await?;
    let jobs = store::active_jobs(&state.db).await?;

    let mut by_company: HashMap<Uuid, Vec<JobOut>> = HashMap::new();
    for job in jobs {
        by_company
            .entry(job.company_id)
            .or_default()
            .push(JobOut::from(job));
    }

    let grouped = companies
        .into_iter()
        .map(|company| CompanyJobsResponse {
            jobs: by_company.remove(&company.id).unwrap_or_default(),
            id: company.id,
            name: company.name,
            logo: company.logo,
            platform: company.platform,
        })
        .collect();
    Ok(Json(grouped))
}

/// GET /api/v1/jobs/search
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let response = run_search(&state.db, &params).await?;
    Ok(Json(response))
}

/// GET /api/v1/companies
pub async fn handle_list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyRow>>, AppError> {
    let companies = store::list_companies(&state.db).await?;
    Ok(Json(companies))
}

#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub board_url: Option<String>,
}

/// POST /api/v1/companies
///
/// Registers a company for the refresh cycle. The logo is derived from the
/// company name when a logo.dev token is configured.
pub async fn handle_create_company(
    State(state): State<AppState>,
    Json(req): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<CompanyRow>), AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("company name must not be empty".to_string()));
    }
    let logo = state
        .config
        .logo_dev_token
        .as_deref()
        .map(|token| logo_url(name, token));

    let company = store::insert_company(
        &state.db,
        name,
        req.domain.as_deref(),
        logo.as_deref(),
        req.platform.as_deref(),
        req.handle.as_deref(),
        req.board_url.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(company)))
}

/// POST /api/v1/refresh
///
/// Runs a full fetch-and-reconcile cycle immediately and reports what
/// happened. The same code path the background scheduler uses.
pub async fn handle_refresh(
    State(state): State<AppState>,
) -> Result<Json<RefreshSummary>, AppError> {
    let summary = refresh_all(&state).await;
    Ok(Json(summary))
}
