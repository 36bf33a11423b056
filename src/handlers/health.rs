use crate::{models::HealthStatus, services::Explorer};
use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

pub async fn health_check(State(explorer): State<Arc<Explorer>>) -> Json<HealthStatus> {
    let api_key_set = explorer.has_api_key().await;

    let status = if api_key_set {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthStatus {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_key_set,
        loading: explorer.is_loading(),
        in_flight: explorer.in_flight(),
        history_len: explorer.history_len().await,
        uptime_seconds: explorer.uptime_seconds(),
        timestamp: Utc::now(),
    })
}
