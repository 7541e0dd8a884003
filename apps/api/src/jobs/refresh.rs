//! Refresh cycle — walks every registered company, dispatches the matching
//! fetcher, and reconciles the jobs table. All failures are local: a broken
//! board or a bad row never aborts the cycle.

use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::fetchers::fetcher_for;
use crate::jobs::store;
use crate::state::AppState;

#[derive(Debug, Default, Clone, Serialize)]
pub struct RefreshSummary {
    pub companies: u32,
    pub fetched: u32,
    pub upserted: u32,
    pub deactivated: u64,
    pub errors: u32,
}

/// Fetches and upserts every registered company's board.
pub async fn refresh_all(state: &AppState) -> RefreshSummary {
    let mut summary = RefreshSummary::default();

    let companies = match store::list_companies(&state.db).await {
        Ok(companies) => companies,
        Err(e) => {
            warn!("refresh aborted, could not load companies: {e}");
            summary.errors += 1;
            return summary;
        }
    };

    for company in &companies {
        let Some(platform) = company.platform.as_deref() else {
            continue;
        };
        let Some(fetcher) = fetcher_for(platform) else {
            warn!("no fetcher for platform: {platform}");
            continue;
        };
        summary.companies += 1;
        info!("fetching jobs for {} ({platform})", company.name);

        let jobs = match fetcher.fetch(&state.http, company).await {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!("fetch failed for {} ({platform}): {e}", company.name);
                summary.errors += 1;
                continue;
            }
        };
        summary.fetched += jobs.len() as u32;

        let mut found_ids = Vec::with_capacity(jobs.len());
        for job in &jobs {
            if job.external_job_id.is_empty() {
                continue;
            }
            found_ids.push(job.external_job_id.clone());
            match store::upsert_fetched_job(&state.db, company, fetcher.platform(), job).await {
                Ok(_) => summary.upserted += 1,
                Err(e) => {
                    warn!("failed to save job '{}': {e}", job.title);
                    summary.errors += 1;
                }
            }
        }

        match store::deactivate_missing(&state.db, company.id, platform, &found_ids).await {
            Ok(count) => summary.deactivated += count,
            Err(e) => {
                warn!("failed to mark inactive jobs for {}: {e}", company.name);
                summary.errors += 1;
            }
        }
    }

    info!(
        "refresh complete: {} jobs upserted across {} companies ({} deactivated, {} errors)",
        summary.upserted, summary.companies, summary.deactivated, summary.errors
    );
    summary
}

/// Probes active jobs that have not been refreshed in a week and deactivates
/// those whose apply link is gone. Returns how many were checked.
pub async fn check_stale_links(state: &AppState) -> u32 {
    let cutoff = Utc::now() - Duration::days(7);
    let stale: Vec<(uuid::Uuid, String)> = match sqlx::query_as(
        r#"
        SELECT id, apply_url FROM jobs
        WHERE is_active AND apply_url IS NOT NULL AND fetched_at <= $1
        "#,
    )
    .bind(cutoff)
    .fetch_all(&state.db)
    .await
    {
        Ok(rows) => rows,
        Err(e) => {
            warn!("stale-link query failed: {e}");
            return 0;
        }
    };

    let mut checked = 0;
    for (id, apply_url) in stale {
        let alive = match state.http.head(&apply_url).send().await {
            Ok(response) => response.status().as_u16() < 400,
            Err(_) => false,
        };
        if !alive {
            if let Err(e) = sqlx::query(
                "UPDATE jobs SET is_active = FALSE, fetched_at = now() WHERE id = $1",
            )
            .bind(id)
            .execute(&state.db)
            .await
            {
                warn!("failed to deactivate job {id}: {e}");
                continue;
            }
        }
        checked += 1;
    }
    info!("stale-link check complete: {checked} jobs checked");
    checked
}
