use crate::models::{EndpointStats, RequestRecord};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// What the result pane shows for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub status_text: String,
    pub success: bool,
    pub response_time_ms: u64,
    pub body: String,
}

impl ResultView {
    pub fn from_record(record: &RequestRecord) -> Self {
        let status_text = if record.success() {
            format!("✅ {} OK", record.status())
        } else {
            format!("❌ {} Error", record.status())
        };

        let content = match (record.success(), record.data()) {
            (true, Some(data)) => data.clone(),
            _ => json!({ "error": record.error().unwrap_or("Request failed") }),
        };

        Self {
            status_text,
            success: record.success(),
            response_time_ms: record.response_time_ms(),
            body: serde_json::to_string_pretty(&content).unwrap_or_else(|_| content.to_string()),
        }
    }
}

/// The "Endpoint Statistics" block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    pub total_requests: usize,
    pub success_rate: String,
    pub avg_response_time: String,
}

impl StatsView {
    pub fn from_stats(stats: &EndpointStats) -> Self {
        Self {
            total_requests: stats.total_requests,
            success_rate: format!("{:.1}%", stats.success_rate),
            avg_response_time: format!("{}ms", stats.avg_response_time_ms),
        }
    }
}

impl std::fmt::Display for StatsView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Endpoint Statistics")?;
        writeln!(f, "Total Requests: {}", self.total_requests)?;
        writeln!(f, "Success Rate: {}", self.success_rate)?;
        write!(f, "Avg Response Time: {}", self.avg_response_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;

    #[test]
    fn renders_successful_record() {
        let record = RequestRecord::completed(HttpMethod::Get, "/offer", 200, 87, json!({"id": 1}));
        let view = ResultView::from_record(&record);

        assert_eq!(view.status_text, "✅ 200 OK");
        assert_eq!(view.response_time_ms, 87);
        assert_eq!(view.body, "{\n  \"id\": 1\n}");
    }

    #[test]
    fn non_success_status_renders_as_error() {
        let record = RequestRecord::completed(HttpMethod::Get, "/offer", 403, 12, json!({"msg": "no"}));
        let view = ResultView::from_record(&record);

        assert_eq!(view.status_text, "❌ 403 Error");
        assert!(!view.success);
        // non-2xx records carry data but the pane shows the error placeholder
        assert_eq!(view.body, "{\n  \"error\": \"Request failed\"\n}");
    }

    #[test]
    fn failed_record_shows_its_message() {
        let record = RequestRecord::failed(HttpMethod::Post, "/offer", 3, "dns error");
        let view = ResultView::from_record(&record);

        assert_eq!(view.status_text, "❌ 0 Error");
        assert_eq!(view.body, "{\n  \"error\": \"dns error\"\n}");
    }

    #[test]
    fn stats_view_formats_one_decimal() {
        let history = vec![
            RequestRecord::completed(HttpMethod::Get, "/offer", 200, 10, json!(null)),
            RequestRecord::completed(HttpMethod::Get, "/offer", 200, 20, json!(null)),
            RequestRecord::completed(HttpMethod::Get, "/offer", 500, 30, json!(null)),
        ];
        let stats = EndpointStats::from_history("/offer", &history).unwrap();
        let view = StatsView::from_stats(&stats);

        assert_eq!(view.success_rate, "66.7%");
        assert_eq!(view.avg_response_time, "20ms");
        assert!(view.to_string().starts_with("Endpoint Statistics\nTotal Requests: 3"));
    }
}
