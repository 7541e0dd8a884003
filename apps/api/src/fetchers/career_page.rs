//! Generic career-page scraper for companies without an ATS board. Extracts
//! job links by CSS selector after a lightweight robots.txt check.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use serde_json::json;
use tracing::warn;
use url::Url;

use crate::fetchers::{board_url_of, FetchError, FetchedJob, Fetcher};
use crate::models::company::CompanyRow;

const DEFAULT_SELECTOR: &str = "a[href*='/jobs/'], a[href*='/careers/'], a[href*='careers']";

pub struct CareerPage;

#[async_trait]
impl Fetcher for CareerPage {
    fn platform(&self) -> &'static str {
        "career_page"
    }

    async fn fetch(
        &self,
        http: &Client,
        company: &CompanyRow,
    ) -> Result<Vec<FetchedJob>, FetchError> {
        let page_url = board_url_of(company)?;
        if !robots_allowed(http, page_url).await {
            warn!("scraping disallowed by robots.txt: {page_url}");
            return Ok(Vec::new());
        }
        let body = http
            .get(page_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(extract_links(&body, page_url))
    }
}

/// Pulls job links out of a listing page. Relative hrefs resolve against
/// the page URL; anchors whose text is empty fall back to the URL itself.
pub fn extract_links(html: &str, page_url: &str) -> Vec<FetchedJob> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse(DEFAULT_SELECTOR) else {
        return Vec::new();
    };
    let base = Url::parse(page_url).ok();

    let mut jobs = Vec::new();
    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let full_url = if href.starts_with("http") {
            href.to_string()
        } else {
            match base.as_ref().and_then(|b| b.join(href).ok()) {
                Some(resolved) => resolved.to_string(),
                None => continue,
            }
        };
        let title = anchor.text().collect::<String>().trim().to_string();
        jobs.push(FetchedJob {
            title: if title.is_empty() {
                full_url.clone()
            } else {
                title
            },
            location: None,
            description: None,
            apply_url: Some(full_url.clone()),
            external_job_id: full_url,
            posted_at: None,
            raw: json!({}),
        });
    }
    jobs
}

/// Heuristic robots.txt check, not a full parser: a missing or unreadable
/// robots.txt allows fetching; a blanket `disallow: /` combined with a
/// disallow for the specific path denies it.
pub async fn robots_allowed(http: &Client, target: &str) -> bool {
    let Ok(url) = Url::parse(target) else {
        return true;
    };
    let Some(host) = url.host_str() else {
        return true;
    };
    let authority = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    let robots_url = format!("{}://{}/robots.txt", url.scheme(), authority);
    let response = match http.get(&robots_url).send().await {
        Ok(r) => r,
        Err(_) => return true,
    };
    if !response.status().is_success() {
        return true;
    }
    let Ok(robots_txt) = response.text().await else {
        return true;
    };
    !robots_denies(&robots_txt, url.path())
}

fn robots_denies(robots_txt: &str, path: &str) -> bool {
    let robots_txt = robots_txt.to_lowercase();
    let path = path.to_lowercase();
    robots_txt.contains("disallow: /") && robots_txt.contains(&format!("disallow: {path}"))
}
