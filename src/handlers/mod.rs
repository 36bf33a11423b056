pub mod dashboard;
pub mod explorer;
pub mod health;
pub mod stats;

pub use dashboard::*;
pub use explorer::*;
pub use health::*;
pub use stats::*;

use crate::services::Explorer;
use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

pub fn router(explorer: Arc<Explorer>) -> Router {
    Router::new()
        .route("/", get(playground))
        .route("/health", get(health_check))
        .route("/api/endpoints", get(list_endpoints))
        .route("/api/key", put(set_api_key))
        .route("/api/requests", get(get_history).post(submit_request))
        .route("/api/stats", get(get_stats))
        .route("/api/stats/summary", get(get_summary))
        .route("/ws/stats", get(websocket_handler))
        .with_state(explorer)
}
