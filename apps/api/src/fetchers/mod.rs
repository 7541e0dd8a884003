//! Source fetchers — one thin client per job source. Each fetcher makes a
//! single HTTP call and maps the payload into `FetchedJob`s; the payload
//! mapping is a pure function so it stays testable without a network.
//!
//! Fetchers never touch the database. The refresh cycle dispatches by
//! platform tag, treats any error as an empty batch for that company, and
//! owns persistence.

pub mod ashby;
pub mod career_page;
pub mod feed;
pub mod greenhouse;
pub mod lever;
pub mod smartrecruiters;
pub mod workable;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::models::company::CompanyRow;

/// User-Agent sent on every outbound request.
pub const USER_AGENT: &str = "JobfeedAggregator/1.0 (+https://jobfeed.example)";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed error: {0}")]
    Feed(#[from] ::rss::Error),

    #[error("unexpected payload: {0}")]
    Payload(String),

    #[error("source not configured: {0}")]
    Misconfigured(String),
}

/// A posting as returned by a source, before persistence. Platform comes
/// from the fetcher; company identity and logo from the registered row.
#[derive(Debug, Clone)]
pub struct FetchedJob {
    pub title: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub apply_url: Option<String>,
    pub external_job_id: String,
    pub posted_at: Option<DateTime<Utc>>,
    pub raw: Value,
}

/// One job source backend. Object-safe so the registry can hand out
/// `&'static dyn Fetcher` by platform tag.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Platform tag stored on job rows and matched against company config.
    fn platform(&self) -> &'static str;

    async fn fetch(
        &self,
        http: &Client,
        company: &CompanyRow,
    ) -> Result<Vec<FetchedJob>, FetchError>;
}

/// Resolves the fetcher for a platform tag. Unknown tags return None and
/// are skipped (with a warning) by the refresh cycle.
pub fn fetcher_for(platform: &str) -> Option<&'static dyn Fetcher> {
    static GREENHOUSE: greenhouse::Greenhouse = greenhouse::Greenhouse;
    static LEVER: lever::Lever = lever::Lever;
    static ASHBY: ashby::Ashby = ashby::Ashby;
    static WORKABLE: workable::Workable = workable::Workable;
    static SMARTRECRUITERS: smartrecruiters::SmartRecruiters = smartrecruiters::SmartRecruiters;
    static RSS: feed::RssFeed = feed::RssFeed;
    static CAREER_PAGE: career_page::CareerPage = career_page::CareerPage;

    match platform {
        "greenhouse" => Some(&GREENHOUSE),
        "lever" => Some(&LEVER),
        "ashby" => Some(&ASHBY),
        "workable" => Some(&WORKABLE),
        "smartrecruiters" => Some(&SMARTRECRUITERS),
        "rss" => Some(&RSS),
        "career_page" => Some(&CAREER_PAGE),
        _ => None,
    }
}

/// The company's board slug, or a configuration error naming the company.
fn handle_of(company: &CompanyRow) -> Result<&str, FetchError> {
    company
        .handle
        .as_deref()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| FetchError::Misconfigured(format!("{} has no board handle", company.name)))
}

/// The company's feed/listing URL, or a configuration error.
fn board_url_of(company: &CompanyRow) -> Result<&str, FetchError> {
    company
        .board_url
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| FetchError::Misconfigured(format!("{} has no board URL", company.name)))
}

/// Lenient date parsing for the formats sources actually emit. Anything
/// unrecognized is None, never an error.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }
    if s.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(millis) = s.parse::<i64>() {
            return Utc.timestamp_millis_opt(millis).single();
        }
    }
    None
}

/// Accepts either a string date or an epoch-milliseconds number (Lever's
/// `postDate` is the latter).
pub fn parse_date_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

/// logo.dev URL for a company name. No token configured → no logo.
pub fn logo_url(company_name: &str, token: &str) -> String {
    let safe_name = company_name.replace(' ', "");
    format!("https://img.logo.dev/name/{safe_name}?token={token}&size=101&retina=true")
}

/// Stringifies a JSON id field that may be a number or a string.
fn id_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
