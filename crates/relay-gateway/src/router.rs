use axum::Router;
use axum::routing::{get, post};
use tower_http::limit::RequestBodyLimitLayer;

use super::handlers::{handle_submission, health_handler};
use super::server::AppState;

pub(crate) fn build_router(state: AppState, max_body_size: usize) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/handle", post(handle_submission))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .with_state(state)
}
