use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// logo.dev public token; unset means company logos are skipped.
    pub logo_dev_token: Option<String>,
    /// Hours between background refresh cycles; 0 disables the scheduler.
    pub refresh_interval_hours: u64,
    /// Per-request timeout for outbound fetcher calls.
    pub fetch_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            logo_dev_token: std::env::var("LOGO_DEV_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            refresh_interval_hours: std::env::var("REFRESH_INTERVAL_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse::<u64>()
                .context("REFRESH_INTERVAL_HOURS must be a number of hours")?,
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "8".to_string())
                .parse::<u64>()
                .context("FETCH_TIMEOUT_SECS must be a number of seconds")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
