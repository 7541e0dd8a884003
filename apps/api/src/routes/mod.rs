pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/jobs", get(handlers::handle_jobs_grouped))
        .route("/api/v1/jobs/search", get(handlers::handle_search))
        .route(
            "/api/v1/companies",
            get(handlers::handle_list_companies).post(handlers::handle_create_company),
        )
        .route("/api/v1/refresh", post(handlers::handle_refresh))
        .with_state(state)
}
