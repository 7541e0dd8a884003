//! Ashby job board client. Ashby exposes boards through an unauthenticated
//! GraphQL endpoint rather than a REST listing.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::fetchers::{handle_of, id_as_string, parse_date_value, FetchError, FetchedJob, Fetcher};
use crate::models::company::CompanyRow;

const ASHBY_API_URL: &str = "https://jobs.ashbyhq.com/api/non-user-graphql";

const JOB_BOARD_QUERY: &str = r#"
query JobBoardWithTeams($organizationHostedJobsPageName: String!) {
  jobBoardWithTeams(
    organizationHostedJobsPageName: $organizationHostedJobsPageName
  ) {
    jobPostings {
      id
      title
      locationName
      postedAt
      externalLink
      descriptionHtml
    }
  }
}
"#;

pub struct Ashby;

#[async_trait]
impl Fetcher for Ashby {
    fn platform(&self) -> &'static str {
        "ashby"
    }

    async fn fetch(
        &self,
        http: &Client,
        company: &CompanyRow,
    ) -> Result<Vec<FetchedJob>, FetchError> {
        let handle = handle_of(company)?;
        let body = json!({
            "operationName": "JobBoardWithTeams",
            "variables": { "organizationHostedJobsPageName": handle },
            "query": JOB_BOARD_QUERY,
        });
        let payload: Value = http
            .post(ASHBY_API_URL)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(map_postings(&payload))
    }
}

/// Maps the GraphQL response. `descriptionHtml` is kept verbatim; the
/// structuring pipeline strips markup at write time.
pub fn map_postings(payload: &Value) -> Vec<FetchedJob> {
    let Some(postings) = payload
        .pointer("/data/jobBoardWithTeams/jobPostings")
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };
    postings
        .iter()
        .filter_map(|posting| {
            let id = id_as_string(posting.get("id")?)?;
            Some(FetchedJob {
                title: posting
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                location: posting
                    .get("locationName")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                description: posting
                    .get("descriptionHtml")
                    .and_then(Value::as_str)
                    .filter(|html| !html.is_empty())
                    .map(str::to_string),
                apply_url: posting
                    .get("externalLink")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                external_job_id: id,
                posted_at: posting.get("postedAt").and_then(parse_date_value),
                raw: posting.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graphql_fixture() -> Value {
        json!({
            "data": {
                "jobBoardWithTeams": {
                    "jobPostings": [
                        {
                            "id": "f0a1b2c3",
                            "title": "Site Reliability Engineer",
                            "locationName": "Remote (EU)",
                            "postedAt": "2024-04-18T09:00:00.000Z",
                            "externalLink": "https://jobs.ashbyhq.com/acme/f0a1b2c3",
                            "descriptionHtml": "<p>Keep things up.</p>"
                        },
                        { "title": "posting without id" }
                    ]
                }
            }
        })
    }

    #[test]
    fn test_map_postings_fields() {
        let jobs = map_postings(&graphql_fixture());
        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.title, "Site Reliability Engineer");
        assert_eq!(job.external_job_id, "f0a1b2c3");
        assert_eq!(job.location.as_deref(), Some("Remote (EU)"));
        assert_eq!(job.description.as_deref(), Some("<p>Keep things up.</p>"));
        assert!(job.posted_at.is_some());
    }

    #[test]
    fn test_map_postings_error_payload() {
        let payload = json!({"errors": [{"message": "board not found"}]});
        assert!(map_postings(&payload).is_empty());
    }
}
