use crate::{
    client::RequestClient,
    config::Config,
    error::ExplorerError,
    models::{
        EndpointSelector, EndpointStats, EndpointSummary, RequestRecord, ResultView, StatsView,
        SubmitInput,
    },
    services::EndpointCatalog,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// What happens to the request history when the API key changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryPolicy {
    /// Start over with an empty history.
    #[default]
    Reset,
    /// Carry the history over to the new key.
    Retain,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub record: RequestRecord,
    pub view: ResultView,
    pub stats: Option<StatsView>,
    pub endpoint_stats: Option<EndpointStats>,
}

/// The seam a UI layer drives.
#[async_trait]
pub trait ExplorerBoundary: Send + Sync {
    async fn submit_request(&self, input: SubmitInput) -> Result<SubmitOutcome, ExplorerError>;

    async fn get_stats(&self, endpoint: &str) -> Option<EndpointStats>;
}

pub struct Explorer {
    http: reqwest::Client,
    base_url: String,
    policy: HistoryPolicy,
    client: RwLock<Option<Arc<RequestClient>>>,
    catalog: EndpointCatalog,
    in_flight: AtomicUsize,
    start_time: Instant,
}

impl Explorer {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, policy: HistoryPolicy) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            policy,
            client: RwLock::new(None),
            catalog: EndpointCatalog::default(),
            in_flight: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        let policy = if config.retain_history_on_key_change {
            HistoryPolicy::Retain
        } else {
            HistoryPolicy::Reset
        };

        let mut explorer = Self::new(http, config.api_base_url.clone(), policy);

        if let Some(key) = config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            let client = RequestClient::with_http_client(
                explorer.http.clone(),
                explorer.base_url.clone(),
                key,
            );
            explorer.client = RwLock::new(Some(Arc::new(client)));
        }

        tracing::info!(
            base_url = %explorer.base_url,
            policy = ?explorer.policy,
            "Explorer initialized"
        );

        Ok(explorer)
    }

    pub fn policy(&self) -> HistoryPolicy {
        self.policy
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn catalog(&self) -> &EndpointCatalog {
        &self.catalog
    }

    /// Swaps in a client for `key`. Blank keys and the current key are
    /// ignored. Returns whether a new client was installed.
    ///
    /// Requests already in flight finish on the client they started with.
    pub async fn set_api_key(&self, key: &str) -> bool {
        if key.trim().is_empty() {
            return false;
        }

        let mut slot = self.client.write().await;

        let next = match (slot.as_ref(), self.policy) {
            (Some(current), _) if current.api_key() == key => return false,
            (Some(current), HistoryPolicy::Retain) => current.rekeyed(key),
            (Some(current), HistoryPolicy::Reset) => current.fresh(key),
            (None, _) => {
                RequestClient::with_http_client(self.http.clone(), self.base_url.clone(), key)
            }
        };

        tracing::info!(policy = ?self.policy, "API key changed");

        *slot = Some(Arc::new(next));
        true
    }

    pub async fn has_api_key(&self) -> bool {
        self.client.read().await.is_some()
    }

    async fn current_client(&self) -> Option<Arc<RequestClient>> {
        self.client.read().await.clone()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight() > 0
    }

    pub async fn history(&self) -> Vec<RequestRecord> {
        match self.current_client().await {
            Some(client) => client.history().await,
            None => Vec::new(),
        }
    }

    pub async fn history_len(&self) -> usize {
        match self.current_client().await {
            Some(client) => client.history_len().await,
            None => 0,
        }
    }

    pub async fn summary(&self) -> Vec<EndpointSummary> {
        match self.current_client().await {
            Some(client) => client.summary().await,
            None => Vec::new(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

#[async_trait]
impl ExplorerBoundary for Explorer {
    async fn submit_request(&self, input: SubmitInput) -> Result<SubmitOutcome, ExplorerError> {
        let client = self
            .current_client()
            .await
            .ok_or(ExplorerError::MissingApiKey)?;

        if input.endpoint.trim().is_empty() {
            return Err(ExplorerError::MissingEndpoint);
        }
        let selector: EndpointSelector = input.endpoint.parse()?;

        let data = parse_body(&input.body)?;

        let record = {
            let _loading = LoadingGuard::enter(&self.in_flight);
            client
                .make_request(selector.method, &selector.path, data.as_ref())
                .await
        };

        let endpoint_stats = client.endpoint_stats(&selector.path).await;

        Ok(SubmitOutcome {
            view: ResultView::from_record(&record),
            stats: endpoint_stats.as_ref().map(StatsView::from_stats),
            endpoint_stats,
            record,
        })
    }

    async fn get_stats(&self, endpoint: &str) -> Option<EndpointStats> {
        self.current_client().await?.endpoint_stats(endpoint).await
    }
}

/// Blank means "no data"; anything else must be JSON.
fn parse_body(body: &str) -> Result<Option<Value>, ExplorerError> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(body)
        .map(Some)
        .map_err(ExplorerError::InvalidJsonBody)
}

struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
