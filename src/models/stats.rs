use crate::models::RequestRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointStats {
    pub total_requests: usize,
    pub success_rate: f64, // 0-100, unrounded
    pub avg_response_time_ms: u64,
    pub last_request: RequestRecord,
}

impl EndpointStats {
    /// Aggregates every record whose endpoint equals `endpoint`. `history`
    /// must be in insertion order so the last match is the latest request.
    pub fn from_history<'a, I>(endpoint: &str, history: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a RequestRecord>,
    {
        let mut total = 0usize;
        let mut successes = 0usize;
        let mut latency_sum = 0u128;
        let mut last = None;

        for record in history.into_iter().filter(|r| r.endpoint() == endpoint) {
            total += 1;
            if record.success() {
                successes += 1;
            }
            latency_sum += u128::from(record.response_time_ms());
            last = Some(record);
        }

        let last = last?;
        let avg = latency_sum as f64 / total as f64;

        Some(Self {
            total_requests: total,
            success_rate: (successes as f64 / total as f64) * 100.0,
            avg_response_time_ms: avg.round() as u64,
            last_request: last.clone(),
        })
    }
}

/// Stats for one endpoint, keyed by path, as listed in a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSummary {
    pub endpoint: String,
    pub stats: EndpointStats,
}

/// One summary entry per distinct endpoint, in first-seen order.
pub fn summarize(history: &[RequestRecord]) -> Vec<EndpointSummary> {
    let mut endpoints: Vec<&str> = Vec::new();
    for record in history {
        if !endpoints.contains(&record.endpoint()) {
            endpoints.push(record.endpoint());
        }
    }

    endpoints
        .into_iter()
        .filter_map(|endpoint| {
            EndpointStats::from_history(endpoint, history).map(|stats| EndpointSummary {
                endpoint: endpoint.to_string(),
                stats,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;
    use serde_json::json;

    fn record(endpoint: &str, status: u16, ms: u64) -> RequestRecord {
        RequestRecord::completed(HttpMethod::Get, endpoint, status, ms, json!({ "ms": ms }))
    }

    #[test]
    fn absent_when_no_record_matches() {
        let history = vec![record("/offer", 200, 10)];
        assert!(EndpointStats::from_history("/campaign", &history).is_none());
        assert!(EndpointStats::from_history("/offer", &Vec::<RequestRecord>::new()).is_none());
    }

    #[test]
    fn success_rate_is_not_rounded() {
        let history = vec![
            record("/offer", 200, 100),
            record("/offer", 201, 101),
            record("/offer", 500, 103),
        ];

        let stats = EndpointStats::from_history("/offer", &history).unwrap();
        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.success_rate, 2.0 / 3.0 * 100.0);
        assert!((stats.success_rate - 66.666_666).abs() < 1e-4);
        // mean 101.33 rounds down
        assert_eq!(stats.avg_response_time_ms, 101);
    }

    #[test]
    fn average_rounds_half_up() {
        let history = vec![record("/offer", 200, 10), record("/offer", 200, 11)];
        let stats = EndpointStats::from_history("/offer", &history).unwrap();
        assert_eq!(stats.avg_response_time_ms, 11);
    }

    #[test]
    fn filters_on_exact_endpoint_and_keeps_last_match() {
        let history = vec![
            record("/offer", 200, 10),
            record("/offer/list", 200, 500),
            record("/offer", 404, 30),
            record("/campaign", 200, 7),
        ];

        let stats = EndpointStats::from_history("/offer", &history).unwrap();
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.success_rate, 50.0);
        assert_eq!(stats.avg_response_time_ms, 20);
        assert_eq!(stats.last_request, history[2]);
    }

    #[test]
    fn failed_records_count_towards_totals() {
        let history = vec![
            RequestRecord::failed(HttpMethod::Post, "/offer", 4, "refused"),
            record("/offer", 200, 6),
        ];

        let stats = EndpointStats::from_history("/offer", &history).unwrap();
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.success_rate, 50.0);
        assert_eq!(stats.avg_response_time_ms, 5);
    }

    #[test]
    fn summary_lists_endpoints_in_first_seen_order() {
        let history = vec![
            record("/campaign", 200, 1),
            record("/offer", 200, 2),
            record("/campaign", 500, 3),
        ];

        let summary = summarize(&history);
        let endpoints: Vec<_> = summary.iter().map(|s| s.endpoint.as_str()).collect();
        assert_eq!(endpoints, vec!["/campaign", "/offer"]);
        assert_eq!(summary[0].stats.total_requests, 2);
    }

    #[test]
    fn serializes_with_camel_case() {
        let history = vec![record("/offer", 200, 10)];
        let stats = EndpointStats::from_history("/offer", &history).unwrap();
        let value = serde_json::to_value(&stats).unwrap();

        assert_eq!(value["totalRequests"], 1);
        assert_eq!(value["successRate"], 100.0);
        assert_eq!(value["avgResponseTimeMs"], 10);
        assert_eq!(value["lastRequest"]["endpoint"], "/offer");
    }
}
