use crate::{
    error::ExplorerError,
    models::{ApiResponse, EndpointStats, EndpointSummary},
    services::{Explorer, ExplorerBoundary},
};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub endpoint: Option<String>,
}

pub async fn get_stats(
    State(explorer): State<Arc<Explorer>>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<ApiResponse<EndpointStats>>, ExplorerError> {
    let endpoint = query
        .endpoint
        .filter(|e| !e.trim().is_empty())
        .ok_or(ExplorerError::MissingEndpoint)?;

    let stats = explorer
        .get_stats(&endpoint)
        .await
        .ok_or(ExplorerError::NoStats(endpoint))?;

    Ok(Json(ApiResponse::ok(stats)))
}

pub async fn get_summary(
    State(explorer): State<Arc<Explorer>>,
) -> Json<ApiResponse<Vec<EndpointSummary>>> {
    Json(ApiResponse::ok(explorer.summary().await))
}
