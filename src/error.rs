use crate::models::{SelectorError, UnknownMethod};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Everything that stops a submission before a request goes out. Failures
/// of the request itself never show up here; they become failed records.
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Invalid JSON in request body")]
    InvalidJsonBody(#[source] serde_json::Error),

    #[error("Please enter an API key")]
    MissingApiKey,

    #[error("Please select an endpoint")]
    MissingEndpoint,

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    #[error("No requests recorded for {0}")]
    NoStats(String),
}

impl From<SelectorError> for ExplorerError {
    fn from(err: SelectorError) -> Self {
        match err {
            SelectorError::Malformed(value) => ExplorerError::InvalidEndpoint(value),
            SelectorError::Method(UnknownMethod(method)) => ExplorerError::UnsupportedMethod(method),
        }
    }
}

impl ExplorerError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ExplorerError::InvalidJsonBody(_) => "INVALID_JSON_BODY",
            ExplorerError::MissingApiKey => "MISSING_API_KEY",
            ExplorerError::MissingEndpoint => "MISSING_ENDPOINT",
            ExplorerError::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            ExplorerError::UnsupportedMethod(_) => "UNSUPPORTED_METHOD",
            ExplorerError::NoStats(_) => "NO_STATS",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ExplorerError::InvalidJsonBody(_)
            | ExplorerError::MissingEndpoint
            | ExplorerError::InvalidEndpoint(_)
            | ExplorerError::UnsupportedMethod(_) => StatusCode::BAD_REQUEST,
            ExplorerError::MissingApiKey => StatusCode::UNAUTHORIZED,
            ExplorerError::NoStats(_) => StatusCode::NOT_FOUND,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub timestamp: chrono::DateTime<Utc>,
    pub request_id: String,
}

impl IntoResponse for ExplorerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            error_code: error_code.to_string(),
            timestamp: Utc::now(),
            request_id: Uuid::new_v4().to_string(),
        };

        tracing::warn!(error = %self, error_code = error_code, "Submission rejected");

        (status, Json(body)).into_response()
    }
}
