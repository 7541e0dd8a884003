mod config;
mod db;
mod errors;
mod fetchers;
mod jobs;
mod models;
mod routes;
mod state;
mod structured;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jobfeed API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and apply migrations
    let db = create_pool(&config.database_url).await?;
    sqlx::migrate!().run(&db).await?;

    // One HTTP client shared by all fetchers
    let http = reqwest::Client::builder()
        .user_agent(fetchers::USER_AGENT)
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .build()?;
    info!("HTTP client initialized");

    // Build app state
    let state = AppState {
        db,
        http,
        config: config.clone(),
    };

    // Background refresh scheduler
    if config.refresh_interval_hours > 0 {
        spawn_refresh_loop(state.clone(), config.refresh_interval_hours);
        info!(
            "Refresh scheduler running every {}h",
            config.refresh_interval_hours
        );
    }

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Runs the refresh cycle (and the weekly stale-link sweep) on an interval.
/// The first tick fires immediately so a fresh deployment has data.
fn spawn_refresh_loop(state: AppState, hours: u64) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(hours * 3600));
        loop {
            ticker.tick().await;
            let summary = jobs::refresh::refresh_all(&state).await;
            info!(
                "scheduled refresh: {} upserted, {} errors",
                summary.upserted, summary.errors
            );
            jobs::refresh::check_stale_links(&state).await;
        }
    });
}
