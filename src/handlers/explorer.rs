use crate::{
    error::ExplorerError,
    models::{ApiResponse, KeyChanged, RequestRecord, SubmitInput},
    services::{CatalogEntry, Explorer, ExplorerBoundary, SubmitOutcome},
};
use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetKeyRequest {
    pub api_key: String,
}

pub async fn submit_request(
    State(explorer): State<Arc<Explorer>>,
    Json(input): Json<SubmitInput>,
) -> Result<Json<ApiResponse<SubmitOutcome>>, ExplorerError> {
    let outcome = explorer.submit_request(input).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

pub async fn get_history(
    State(explorer): State<Arc<Explorer>>,
) -> Json<ApiResponse<Vec<RequestRecord>>> {
    Json(ApiResponse::ok(explorer.history().await))
}

pub async fn set_api_key(
    State(explorer): State<Arc<Explorer>>,
    Json(request): Json<SetKeyRequest>,
) -> Result<Json<ApiResponse<KeyChanged>>, ExplorerError> {
    if request.api_key.trim().is_empty() && !explorer.has_api_key().await {
        return Err(ExplorerError::MissingApiKey);
    }

    explorer.set_api_key(&request.api_key).await;

    Ok(Json(ApiResponse::ok(KeyChanged {
        api_key_set: explorer.has_api_key().await,
        history_len: explorer.history_len().await,
    })))
}

pub async fn list_endpoints(
    State(explorer): State<Arc<Explorer>>,
) -> Json<ApiResponse<Vec<CatalogEntry>>> {
    Json(ApiResponse::ok(explorer.catalog().entries().to_vec()))
}
