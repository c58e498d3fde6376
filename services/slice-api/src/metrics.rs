//! Request metrics.

use std::time::Instant;

use metrics::{counter, histogram};

pub const REQUESTS_TOTAL: &str = "slice_api_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "slice_api_request_duration_seconds";

/// Times one request and records it under `endpoint` when finished.
pub struct RequestTimer {
    endpoint: &'static str,
    start: Instant,
}

impl RequestTimer {
    pub fn start(endpoint: &'static str) -> Self {
        Self {
            endpoint,
            start: Instant::now(),
        }
    }

    /// Record the request count and duration with the final status code.
    pub fn finish(self, status: u16) {
        record_request(self.endpoint, status, self.start.elapsed().as_secs_f64());
    }
}

pub fn record_request(endpoint: &'static str, status: u16, seconds: f64) {
    counter!(REQUESTS_TOTAL, "endpoint" => endpoint, "status" => status.to_string()).increment(1);
    histogram!(REQUEST_DURATION_SECONDS, "endpoint" => endpoint).record(seconds);
}
