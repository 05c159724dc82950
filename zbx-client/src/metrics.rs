//! Client metrics definitions
//!
//! OpenTelemetry instruments recorded by [`ZbxClient`](crate::ZbxClient)
//! when observability is enabled through the builder:
//!
//! - **requests_total**: calls issued, by method and outcome (counter)
//! - **request_duration**: round-trip latency in seconds (histogram)
//! - **errors_total**: failed calls, by fault kind (counter)
//! - **logins_total**: completed logins (counter)
//!
//! ```rust,no_run
//! use zbx_client::ClientMetrics;
//!
//! let metrics = ClientMetrics::new("inventory-sync");
//! metrics.record_request("user.get", "success", 0.042);
//! ```

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// Client metrics for monitoring
pub struct ClientMetrics {
    /// Total number of calls sent
    pub requests_total: Counter<u64>,
    /// Call duration in seconds
    pub request_duration: Histogram<f64>,
    /// Total number of failed calls
    pub errors_total: Counter<u64>,
    /// Total number of successful logins
    pub logins_total: Counter<u64>,
}

impl ClientMetrics {
    /// Create metrics on the global meter named after the service
    pub fn new(service_name: impl Into<String>) -> Self {
        let name: &'static str = Box::leak(service_name.into().into_boxed_str());
        let meter = global::meter(name);
        Self::new_with_meter(&meter)
    }

    /// Create metrics on a caller-supplied meter
    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("zbx.client.requests.total")
                .with_description("Total number of JSON-RPC calls sent")
                .build(),
            request_duration: meter
                .f64_histogram("zbx.client.request.duration")
                .with_description("JSON-RPC call duration in seconds")
                .with_unit("s")
                .build(),
            errors_total: meter
                .u64_counter("zbx.client.errors.total")
                .with_description("Total number of failed JSON-RPC calls")
                .build(),
            logins_total: meter
                .u64_counter("zbx.client.logins.total")
                .with_description("Total number of successful logins")
                .build(),
        }
    }

    /// Record a completed call
    pub fn record_request(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    /// Record a failed call by fault kind
    pub fn record_error(&self, error_kind: &'static str) {
        self.errors_total
            .add(1, &[KeyValue::new("error_kind", error_kind)]);
    }

    /// Record a successful login
    pub fn record_login(&self) {
        self.logins_total.add(1, &[]);
    }
}
