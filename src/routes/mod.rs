use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tower::ServiceBuilder;

use crate::{
    AppState,
    middleware::{cors_layer, log_requests},
};

pub mod health;
pub mod planner;
pub mod search;

/// Request bodies above this size are rejected with 413.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .merge(planner::routes())
        .merge(search::routes())
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(axum::middleware::from_fn(log_requests))
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}
