use reqwest::Client;
use sqlx::PgPool;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum
/// extractors. The single reqwest client is reused by every fetcher.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub http: Client,
    pub config: Config,
}
