use crate::models::HttpMethod;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One request/response (or failure) cycle. Built once through
/// [`RequestRecord::completed`] or [`RequestRecord::failed`] and never
/// mutated afterwards; exactly one of `data` / `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    timestamp: DateTime<Utc>,
    method: HttpMethod,
    endpoint: String,
    status: u16,
    response_time_ms: u64,
    success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl RequestRecord {
    /// The HTTP exchange finished and the body parsed as JSON, whatever the status.
    pub fn completed(
        method: HttpMethod,
        endpoint: impl Into<String>,
        status: u16,
        response_time_ms: u64,
        data: Value,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            method,
            endpoint: endpoint.into(),
            status,
            response_time_ms,
            success: (200..300).contains(&status),
            data: Some(data),
            error: None,
        }
    }

    /// Transport or parse failure. Status is always 0.
    pub fn failed(
        method: HttpMethod,
        endpoint: impl Into<String>,
        response_time_ms: u64,
        error: impl Into<String>,
    ) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "Request failed".to_string();
        }

        Self {
            timestamp: Utc::now(),
            method,
            endpoint: endpoint.into(),
            status: 0,
            response_time_ms,
            success: false,
            data: None,
            error: Some(error),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn response_time_ms(&self) -> u64 {
        self.response_time_ms
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
