//! Workable client. Workable's public surface is a per-company RSS feed;
//! a missing feed is common (not every account enables it) and is treated
//! as an empty board, logged at info level by the refresh cycle.

use async_trait::async_trait;
use reqwest::Client;
use rss::Channel;
use serde_json::json;

use crate::fetchers::{handle_of, FetchError, FetchedJob, Fetcher};
use crate::models::company::CompanyRow;
use crate::structured::normalize::normalize;

pub struct Workable;

#[async_trait]
impl Fetcher for Workable {
    fn platform(&self) -> &'static str {
        "workable"
    }

    async fn fetch(
        &self,
        http: &Client,
        company: &CompanyRow,
    ) -> Result<Vec<FetchedJob>, FetchError> {
        let handle = handle_of(company)?;
        let url = format!("https://{handle}.workable.com/jobs.rss");
        let bytes = http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let channel = Channel::read_from(&bytes[..])?;
        Ok(map_channel(&channel))
    }
}

/// Maps feed items. The item link doubles as the external id, so items
/// without a link are skipped.
pub fn map_channel(channel: &Channel) -> Vec<FetchedJob> {
    channel
        .items()
        .iter()
        .filter_map(|item| {
            let link = item.link()?.to_string();
            let description = item
                .description()
                .map(normalize)
                .filter(|text| !text.is_empty());
            Some(FetchedJob {
                title: item.title().unwrap_or_default().to_string(),
                location: None,
                description,
                apply_url: Some(link.clone()),
                external_job_id: link,
                posted_at: None,
                raw: json!({}),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Acme Jobs</title>
    <link>https://acme.workable.com</link>
    <description>Open positions</description>
    <item>
      <title>Support Engineer</title>
      <link>https://apply.workable.com/acme/j/AAAA1111/</link>
      <description>&lt;p&gt;Help customers succeed.&lt;/p&gt;</description>
    </item>
    <item>
      <title>Item without link is skipped</title>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_map_channel_items() {
        let channel = Channel::read_from(FEED.as_bytes()).unwrap();
        let jobs = map_channel(&channel);
        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.title, "Support Engineer");
        assert_eq!(
            job.external_job_id,
            "https://apply.workable.com/acme/j/AAAA1111/"
        );
        assert_eq!(job.apply_url.as_deref(), Some(job.external_job_id.as_str()));
        assert_eq!(job.description.as_deref(), Some("Help customers succeed."));
        assert!(job.posted_at.is_none());
    }
}
