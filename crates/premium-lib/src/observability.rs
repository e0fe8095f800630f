//! Observability infrastructure for hybrid prediction
//!
//! Provides:
//! - Prometheus metrics (prediction latency, rows predicted, failures)
//! - Structured logging of service events with tracing

use prometheus::{register_histogram, register_int_counter, Histogram, IntCounter};
use std::path::Path;
use std::sync::OnceLock;
use tracing::info;

/// Histogram buckets for prediction latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<PredictionMetricsInner> = OnceLock::new();

struct PredictionMetricsInner {
    prediction_latency_seconds: Histogram,
    predictions_total: IntCounter,
    prediction_errors_total: IntCounter,
}

impl PredictionMetricsInner {
    fn new() -> Self {
        Self {
            prediction_latency_seconds: register_histogram!(
                "premium_hybrid_prediction_latency_seconds",
                "Time spent per hybrid call, nested hybrids observed separately",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register prediction_latency_seconds"),

            predictions_total: register_int_counter!(
                "premium_hybrid_predictions_total",
                "Rows predicted, counted once per hybrid call including nested hybrids"
            )
            .expect("Failed to register predictions_total"),

            prediction_errors_total: register_int_counter!(
                "premium_hybrid_prediction_errors_total",
                "Failed hybrid calls, counted once per hybrid including nested hybrids"
            )
            .expect("Failed to register prediction_errors_total"),
        }
    }
}

/// Handle to the process-wide prediction metrics
///
/// Clones share the same underlying Prometheus collectors.
#[derive(Clone)]
pub struct PredictionMetrics {
    _private: (),
}

impl Default for PredictionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionMetrics {
    /// Create a handle, registering the collectors on first use
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(PredictionMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &PredictionMetricsInner {
        GLOBAL_METRICS.get_or_init(PredictionMetricsInner::new)
    }

    pub fn observe_prediction_latency(&self, duration_secs: f64) {
        self.inner().prediction_latency_seconds.observe(duration_secs);
    }

    /// Add `rows` to the predicted-rows counter
    pub fn add_predictions(&self, rows: usize) {
        self.inner().predictions_total.inc_by(rows as u64);
    }

    pub fn inc_prediction_errors(&self) {
        self.inner().prediction_errors_total.inc();
    }

    pub fn predictions_total(&self) -> u64 {
        self.inner().predictions_total.get()
    }

    pub fn prediction_errors_total(&self) -> u64 {
        self.inner().prediction_errors_total.get()
    }
}

/// Structured logger for service events
#[derive(Clone)]
pub struct StructuredLogger {
    service_name: String,
}

impl StructuredLogger {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn log_startup(&self, version: &str) {
        info!(
            event = "service_started",
            service = %self.service_name,
            version = %version,
            "Premium hybrid service started"
        );
    }

    pub fn log_artifact_dir(&self, path: &Path, created: bool) {
        info!(
            event = "artifact_dir_ready",
            service = %self.service_name,
            path = %path.display(),
            created = created,
            "Artifact directory ready"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_metrics_accumulate() {
        // Collectors live in the global registry, so compare deltas.
        let metrics = PredictionMetrics::new();
        let rows_before = metrics.predictions_total();
        let errors_before = metrics.prediction_errors_total();

        metrics.observe_prediction_latency(0.0002);
        metrics.add_predictions(4);
        metrics.inc_prediction_errors();

        assert!(metrics.predictions_total() >= rows_before + 4);
        assert!(metrics.prediction_errors_total() > errors_before);
    }

    #[test]
    fn test_help_text_describes_nested_counting() {
        PredictionMetrics::new();
        let families = prometheus::gather();

        for name in [
            "premium_hybrid_predictions_total",
            "premium_hybrid_prediction_errors_total",
        ] {
            let family = families
                .iter()
                .find(|f| f.get_name() == name)
                .unwrap_or_else(|| panic!("{} not registered", name));
            assert!(family.get_help().contains("nested"), "help for {}", name);
        }
    }

    #[test]
    fn test_structured_logger_creation() {
        let logger = StructuredLogger::new("test-service");
        assert_eq!(logger.service_name(), "test-service");
    }
}
