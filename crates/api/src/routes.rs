use crate::handlers;
use crate::middleware::log_requests;
use crate::state::AppState;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/retention/run", post(handlers::run_retention))
        .with_state(state)
}

/// Full application router: the API under `/api`, wrapped in request logging.
pub fn create_app(state: AppState) -> Router {
    let request_logging = state.request_logging.clone();
    Router::new()
        .nest("/api", create_api_routes(state))
        .layer(from_fn_with_state(request_logging, log_requests))
}
