//! SmartRecruiters client. There is no single public listing API shape for
//! all customers, so this tries the common endpoint patterns and takes the
//! first one that answers with postings.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::warn;

use crate::fetchers::{handle_of, id_as_string, parse_date_value, FetchError, FetchedJob, Fetcher};
use crate::models::company::CompanyRow;
use crate::structured::normalize::normalize;

pub struct SmartRecruiters;

#[async_trait]
impl Fetcher for SmartRecruiters {
    fn platform(&self) -> &'static str {
        "smartrecruiters"
    }

    async fn fetch(
        &self,
        http: &Client,
        company: &CompanyRow,
    ) -> Result<Vec<FetchedJob>, FetchError> {
        let handle = handle_of(company)?;
        let candidates = [
            format!("https://api.smartrecruiters.com/v1/companies/{handle}/jobs"),
            format!("https://api.smartrecruiters.com/v1/companies/{handle}/postings"),
        ];
        for url in &candidates {
            let response = match http.get(url).send().await {
                Ok(r) => r,
                Err(e) => {
                    warn!("smartrecruiters request failed for {}: {e}", company.name);
                    continue;
                }
            };
            if !response.status().is_success() {
                continue;
            }
            let payload: Value = response.json().await?;
            let jobs = map_listing(&payload);
            if !jobs.is_empty() {
                return Ok(jobs);
            }
        }
        Ok(Vec::new())
    }
}

/// Normalizes the varying listing shapes: the postings array may sit under
/// `content`, `jobs`, or `data`, and titles under `name`, `title`, or
/// `jobTitle`.
pub fn map_listing(payload: &Value) -> Vec<FetchedJob> {
    let Some(items) = payload
        .get("content")
        .or_else(|| payload.get("jobs"))
        .or_else(|| payload.get("data"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let apply_url = item
                .get("applyUrl")
                .or_else(|| item.get("link"))
                .and_then(Value::as_str)
                .map(str::to_string);
            let id = item
                .get("id")
                .or_else(|| item.get("refNumber"))
                .and_then(id_as_string)
                .or_else(|| apply_url.clone())?;
            let description = item
                .get("description")
                .and_then(Value::as_str)
                .map(normalize)
                .filter(|text| !text.is_empty());
            Some(FetchedJob {
                title: item
                    .get("name")
                    .or_else(|| item.get("title"))
                    .or_else(|| item.get("jobTitle"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                location: location_of(item),
                description,
                apply_url,
                external_job_id: id,
                posted_at: item
                    .get("createdDate")
                    .or_else(|| item.get("releasedDate"))
                    .or_else(|| item.get("postedAt"))
                    .and_then(parse_date_value),
                raw: item.clone(),
            })
        })
        .collect()
}

fn location_of(item: &Value) -> Option<String> {
    item.get("location")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| {
            item.pointer("/location/city")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .or_else(|| item.get("city").and_then(Value::as_str).map(str::to_string))
}
