//! Greenhouse board API client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::fetchers::{handle_of, id_as_string, parse_date, FetchError, FetchedJob, Fetcher};
use crate::models::company::CompanyRow;
use crate::structured::normalize::normalize;

pub struct Greenhouse;

#[async_trait]
impl Fetcher for Greenhouse {
    fn platform(&self) -> &'static str {
        "greenhouse"
    }

    async fn fetch(
        &self,
        http: &Client,
        company: &CompanyRow,
    ) -> Result<Vec<FetchedJob>, FetchError> {
        let handle = handle_of(company)?;
        let url = format!("https://boards-api.greenhouse.io/v1/boards/{handle}/jobs");
        let payload: Value = http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(map_board(&payload, handle))
    }
}

/// Maps a board payload to fetched jobs. Entries without an id are skipped;
/// a missing `absolute_url` falls back to the canonical board URL.
pub fn map_board(payload: &Value, handle: &str) -> Vec<FetchedJob> {
    let Some(jobs) = payload.get("jobs").and_then(Value::as_array) else {
        return Vec::new();
    };
    jobs.iter()
        .filter_map(|job| {
            let id = id_as_string(job.get("id")?)?;
            let apply_url = job
                .get("absolute_url")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("https://boards.greenhouse.io/{handle}/jobs/{id}"));
            let description = job
                .get("content")
                .and_then(Value::as_str)
                .map(normalize)
                .filter(|text| !text.is_empty());
            Some(FetchedJob {
                title: job
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                location: job
                    .pointer("/location/name")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                description,
                apply_url: Some(apply_url),
                external_job_id: id,
                posted_at: job
                    .get("updated_at")
                    .or_else(|| job.get("created_at"))
                    .and_then(Value::as_str)
                    .and_then(parse_date),
                raw: job.clone(),
            })
        })
        .collect()
}
