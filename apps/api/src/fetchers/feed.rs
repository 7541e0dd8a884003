//! Generic RSS feed client for companies that publish openings through a
//! plain feed rather than an ATS.

use async_trait::async_trait;
use reqwest::Client;
use rss::Channel;
use serde_json::json;

use crate::fetchers::{board_url_of, parse_date, FetchError, FetchedJob, Fetcher};
use crate::models::company::CompanyRow;
use crate::structured::normalize::normalize;

pub struct RssFeed;

#[async_trait]
impl Fetcher for RssFeed {
    fn platform(&self) -> &'static str {
        "rss"
    }

    async fn fetch(
        &self,
        http: &Client,
        company: &CompanyRow,
    ) -> Result<Vec<FetchedJob>, FetchError> {
        let feed_url = board_url_of(company)?;
        let bytes = http
            .get(feed_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let channel = Channel::read_from(&bytes[..])?;
        Ok(map_channel(&channel))
    }
}

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
                external_job_id: link.clone(),
                posted_at: item.pub_date().and_then(parse_date),
                raw: json!({
                    "title": item.title(),
                    "link": link,
                    "pub_date": item.pub_date(),
                }),
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
    <title>Engineering Openings</title>
    <link>https://example.org/careers</link>
    <description>Feed of roles</description>
    <item>
      <title>Compiler Engineer</title>
      <link>https://example.org/careers/compiler-engineer</link>
      <description>Work on our Rust toolchain.</description>
      <pubDate>Thu, 02 May 2024 10:30:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_map_channel_with_pub_date() {
        let channel = Channel::read_from(FEED.as_bytes()).unwrap();
        let jobs = map_channel(&channel);
        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.title, "Compiler Engineer");
        assert!(job.posted_at.is_some());
        assert_eq!(
            job.description.as_deref(),
            Some("Work on our Rust toolchain.")
        );
        assert_eq!(job.raw["link"], "https://example.org/careers/compiler-engineer");
    }
}
