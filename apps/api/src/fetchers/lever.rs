//! Lever postings API client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::fetchers::{
    handle_of, id_as_string, parse_date_value, FetchError, FetchedJob, Fetcher,
};
use crate::models::company::CompanyRow;
use crate::structured::normalize::normalize;

pub struct Lever;

#[async_trait]
impl Fetcher for Lever {
    fn platform(&self) -> &'static str {
        "lever"
    }

    async fn fetch(
        &self,
        http: &Client,
        company: &CompanyRow,
    ) -> Result<Vec<FetchedJob>, FetchError> {
        let handle = handle_of(company)?;
        let url = format!("https://api.lever.co/v0/postings/{handle}?mode=json");
        let payload: Value = http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(map_postings(&payload))
    }
}

/// Maps the postings array. Lever is loose about field names across board
/// configurations, so ids and URLs fall through a chain of candidates.
pub fn map_postings(payload: &Value) -> Vec<FetchedJob> {
    let Some(postings) = payload.as_array() else {
        return Vec::new();
    };
    postings
        .iter()
        .filter_map(|job| {
            let id = job
                .get("id")
                .or_else(|| job.get("uuid"))
                .or_else(|| job.get("postingId"))
                .and_then(id_as_string)?;
            let apply_url = job
                .get("hostedUrl")
                .or_else(|| job.get("applyUrl"))
                .or_else(|| job.get("url"))
                .and_then(Value::as_str)
                .map(str::to_string);
            let description = job
                .get("description")
                .and_then(Value::as_str)
                .map(normalize)
                .filter(|text| !text.is_empty());
            Some(FetchedJob {
                title: job
                    .get("text")
                    .or_else(|| job.get("title"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                location: job
                    .pointer("/categories/location")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                description,
                apply_url,
                external_job_id: id,
                posted_at: job
                    .get("postDate")
                    .or_else(|| job.get("createdAt"))
                    .or_else(|| job.get("datePosted"))
                    .and_then(parse_date_value),
                raw: job.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn postings_fixture() -> Value {
        json!([
            {
                "id": "e4f2-11aa",
                "text": "Platform Engineer",
                "hostedUrl": "https://jobs.lever.co/acme/e4f2-11aa",
                "categories": {"location": "Amsterdam", "team": "Infrastructure"},
                "description": "<div>Own the platform.</div>",
                "createdAt": 1714645800000i64
            },
            {
                "uuid": "b7c1-22bb",
                "title": "Designer",
                "applyUrl": "https://jobs.lever.co/acme/b7c1-22bb/apply"
            },
            {
                "text": "No identifier at all"
            }
        ])
    }

    #[test]
    fn test_map_postings_primary_fields() {
        let jobs = map_postings(&postings_fixture());
        assert_eq!(jobs.len(), 2);
        let first = &jobs[0];
        assert_eq!(first.title, "Platform Engineer");
        assert_eq!(first.external_job_id, "e4f2-11aa");
        assert_eq!(first.location.as_deref(), Some("Amsterdam"));
        assert_eq!(first.description.as_deref(), Some("Own the platform."));
        assert_eq!(first.posted_at.unwrap().timestamp_millis(), 1_714_645_800_000);
    }

    #[test]
    fn test_map_postings_fallback_fields() {
        let jobs = map_postings(&postings_fixture());
        let second = &jobs[1];
        assert_eq!(second.title, "Designer");
        assert_eq!(second.external_job_id, "b7c1-22bb");
        assert_eq!(
            second.apply_url.as_deref(),
            Some("https://jobs.lever.co/acme/b7c1-22bb/apply")
        );
        assert!(second.posted_at.is_none());
    }

    #[test]
    fn test_map_postings_non_array_payload() {
        assert!(map_postings(&json!({"error": "rate limited"})).is_empty());
    }
}
