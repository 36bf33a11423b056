use crate::models::{summarize, EndpointStats, EndpointSummary, HttpMethod, RequestRecord};
use anyhow::{Context, Result};
use reqwest::{header::ACCEPT, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

pub const DEFAULT_BASE_URL: &str = "https://pierdun.com/public/api/v1";

/// Sends requests to one API with one key and keeps an append-only log of
/// every attempt.
pub struct RequestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    history: Arc<RwLock<Vec<RequestRecord>>>,
}

impl RequestClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, api_key)
    }

    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            history: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Same API and connection pool under a different key, appending to the
    /// same history as `self` (including requests still in flight here).
    pub fn rekeyed(&self, api_key: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            api_key: api_key.into(),
            history: self.history.clone(),
        }
    }

    /// Same API and connection pool under a different key, with an empty history.
    pub fn fresh(&self, api_key: impl Into<String>) -> Self {
        Self::with_http_client(self.http.clone(), self.base_url.clone(), api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Issues exactly one HTTP call and records the outcome. Never fails:
    /// transport and parse errors come back as a record with status 0.
    pub async fn make_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        data: Option<&Value>,
    ) -> RequestRecord {
        let started = Instant::now();

        tracing::info!(%method, endpoint, "Sending request");

        let record = match self.execute(method, endpoint, data).await {
            Ok((status, body)) => {
                let elapsed = elapsed_ms(started);
                tracing::info!(
                    %method,
                    endpoint,
                    status,
                    response_time_ms = elapsed,
                    "Request completed"
                );
                RequestRecord::completed(method, endpoint, status, elapsed, body)
            }
            Err(e) => {
                let elapsed = elapsed_ms(started);
                tracing::warn!(
                    %method,
                    endpoint,
                    response_time_ms = elapsed,
                    "Request failed: {:#}",
                    e
                );
                RequestRecord::failed(method, endpoint, elapsed, format!("{:#}", e))
            }
        };

        self.history.write().await.push(record.clone());
        record
    }

    async fn execute(
        &self,
        method: HttpMethod,
        endpoint: &str,
        data: Option<&Value>,
    ) -> Result<(u16, Value)> {
        let data = data.filter(|d| is_provided(d));
        let url = build_url(&self.base_url, method, endpoint, data)?;

        let mut request = self
            .http
            .request(method.to_reqwest(), url)
            .header("api-key", self.api_key.as_str())
            .header(ACCEPT, "application/json");

        if method.is_body_bearing() {
            if let Some(data) = data {
                // sets Content-Type: application/json
                request = request.json(data);
            }
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        let body = serde_json::from_slice(&bytes)
            .with_context(|| format!("Response body is not valid JSON (HTTP {})", status))?;

        Ok((status, body))
    }

    /// Snapshot of every record, in the order requests completed.
    pub async fn history(&self) -> Vec<RequestRecord> {
        self.history.read().await.clone()
    }

    pub async fn history_len(&self) -> usize {
        self.history.read().await.len()
    }

    pub async fn endpoint_stats(&self, endpoint: &str) -> Option<EndpointStats> {
        let history = self.history.read().await;
        EndpointStats::from_history(endpoint, history.iter())
    }

    pub async fn summary(&self) -> Vec<EndpointSummary> {
        let history = self.history.read().await;
        summarize(&history)
    }
}

/// `{base_url}{endpoint}`, plus a query string built from `data` for GET.
pub(crate) fn build_url(
    base_url: &str,
    method: HttpMethod,
    endpoint: &str,
    data: Option<&Value>,
) -> Result<Url> {
    let raw = format!("{}{}", base_url, endpoint);
    let mut url = Url::parse(&raw).with_context(|| format!("Invalid request URL: {}", raw))?;

    if method.is_body_bearing() {
        return Ok(url);
    }

    match data {
        Some(Value::Object(params)) if !params.is_empty() => {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, &query_value(value));
            }
        }
        Some(Value::Object(_)) | None => {}
        Some(other) => {
            tracing::warn!(endpoint, "Ignoring non-object query data: {}", other);
        }
    }

    Ok(url)
}

/// `null`, `false`, `0` and `""` count as "no data": no body, no query.
fn is_provided(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_data_becomes_query_string() {
        let data = json!({"a": 1, "b": "x"});
        let url = build_url("https://api.test/v1", HttpMethod::Get, "/offer", Some(&data)).unwrap();
        assert_eq!(url.as_str(), "https://api.test/v1/offer?a=1&b=x");
    }

    #[test]
    fn post_data_leaves_url_untouched() {
        let data = json!({"a": 1, "b": "x"});
        let url = build_url("https://api.test/v1", HttpMethod::Post, "/offer", Some(&data)).unwrap();
        assert_eq!(url.as_str(), "https://api.test/v1/offer");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn query_values_are_form_encoded() {
        let data = json!({"name": "a b&c", "ids": [1, 2], "on": true, "none": null});
        let url = build_url("https://api.test/v1", HttpMethod::Get, "/offer", Some(&data)).unwrap();
        assert_eq!(
            url.query(),
            Some("name=a+b%26c&ids=%5B1%2C2%5D&on=true&none=null")
        );
    }

    #[test]
    fn query_keeps_authored_key_order() {
        let data: Value = serde_json::from_str(r#"{"z": 1, "a": 2}"#).unwrap();
        let url = build_url("https://api.test/v1", HttpMethod::Get, "/offer", Some(&data)).unwrap();
        assert_eq!(url.query(), Some("z=1&a=2"));
    }

    #[test]
    fn get_without_data_or_with_empty_object_has_no_query() {
        let empty = json!({});
        for data in [None, Some(&empty)] {
            let url = build_url("https://api.test/v1", HttpMethod::Get, "/offer", data).unwrap();
            assert_eq!(url.query(), None);
        }
    }

    #[test]
    fn non_object_get_data_is_ignored() {
        let data = json!([1, 2, 3]);
        let url = build_url("https://api.test/v1", HttpMethod::Get, "/offer", Some(&data)).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn falsy_values_are_not_data() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_provided(&value), "{value}");
        }
        for value in [json!(true), json!(1), json!("x"), json!([]), json!({})] {
            assert!(is_provided(&value), "{value}");
        }
    }

    #[test]
    fn rejects_unparseable_url() {
        assert!(build_url("not a base", HttpMethod::Get, "/offer", None).is_err());
    }

    #[tokio::test]
    async fn invalid_base_url_becomes_failed_record() {
        let client = RequestClient::new("not a base", "key");
        let record = client.make_request(HttpMethod::Get, "/offer", None).await;

        assert_eq!(record.status(), 0);
        assert!(!record.success());
        assert!(record.error().unwrap().contains("Invalid request URL"));
        assert_eq!(client.history_len().await, 1);
    }

    #[tokio::test]
    async fn rekeyed_client_shares_history_and_fresh_does_not() {
        let client = RequestClient::new("not a base", "one");
        client.make_request(HttpMethod::Get, "/offer", None).await;

        let shared = client.rekeyed("two");
        let fresh = client.fresh("three");

        assert_eq!(shared.api_key(), "two");
        assert_eq!(shared.history_len().await, 1);
        assert_eq!(fresh.history_len().await, 0);

        shared.make_request(HttpMethod::Get, "/offer", None).await;
        assert_eq!(client.history_len().await, 2);
    }
}
