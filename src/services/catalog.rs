use serde::Serialize;
use serde_json::{json, Value};

/// One option of the endpoint selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    /// `"METHOD /path"`, relative to the API base URL.
    pub value: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl CatalogEntry {
    fn new(value: &str, description: &str, example: Option<Value>) -> Self {
        Self {
            value: value.to_string(),
            description: description.to_string(),
            example,
        }
    }
}

pub struct EndpointCatalog {
    entries: Vec<CatalogEntry>,
}

impl EndpointCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, value: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.value == value)
    }

    /// Pretty-printed example body to prefill the request-body field with.
    pub fn example_for(&self, value: &str) -> Option<String> {
        let example = self.get(value)?.example.as_ref()?;
        serde_json::to_string_pretty(example).ok()
    }
}

impl Default for EndpointCatalog {
    // Binom public API v1
    fn default() -> Self {
        Self::new(vec![
            CatalogEntry::new(
                "GET /binom/protect/methods",
                "Get available bot detection methods and presets",
                None,
            ),
            CatalogEntry::new(
                "GET /rotation/list/filtered",
                "Get Rotation list filtered",
                Some(json!({ "datePreset": "last_7_days", "timezone": "UTC" })),
            ),
            CatalogEntry::new(
                "POST /campaign/switch_domain",
                "Change Domain for multiple Campaigns",
                Some(json!({
                    "name": "Test Campaign",
                    "trafficSourceId": 1,
                    "cost": 0.1,
                    "currency": "USD"
                })),
            ),
            CatalogEntry::new(
                "POST /csv/task/dequeue/123",
                "Remove task from the queue",
                Some(json!({ "name": "Example Resource" })),
            ),
            CatalogEntry::new(
                "POST /report/mark/campaign/123",
                "Set mark to token by campaign id",
                Some(json!({
                    "name": "Test Campaign",
                    "trafficSourceId": 1,
                    "cost": 0.1,
                    "currency": "USD"
                })),
            ),
            CatalogEntry::new(
                "POST /report/mark/traffic_source/123/multiple",
                "Set mark to multiple tokens by traffic source id",
                Some(json!({ "token": "click_id", "tokenValue": "accepted", "mark": "mints" })),
            ),
            CatalogEntry::new(
                "PUT /campaign/landing/pause",
                "Pause landing in campaign",
                Some(json!({ "name": "Updated Campaign Name", "cost": 0.15, "status": "active" })),
            ),
            CatalogEntry::new(
                "PUT /offer/123/rename",
                "Rename Offer",
                Some(json!({
                    "name": "Premium Offer",
                    "url": "https://affiliate.com/offer",
                    "payout": 50.0
                })),
            ),
            CatalogEntry::new(
                "PUT /user/2fa/secret/generate",
                "Generate two-factor secrets for current user",
                Some(json!({ "name": "Example Resource" })),
            ),
        ])
    }
}
