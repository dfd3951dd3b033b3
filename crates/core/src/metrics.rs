//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Conversions (outcomes, engine latency)
//! - Remote record fetches (outcomes)
//!
//! The server registers these into its registry at startup.

use once_cell::sync::Lazy;
use prometheus::{core::Collector, HistogramOpts, HistogramVec, IntCounterVec, Opts};

/// Conversions total by result ("success" or the failure kind).
pub static CONVERSIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("bibu_conversions_total", "Total conversion requests"),
        &["result"],
    )
    .unwrap()
});

/// Time spent inside the conversion engine, in seconds.
pub static CONVERSION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "bibu_conversion_duration_seconds",
            "Duration of a single engine conversion",
        )
        .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["engine"],
    )
    .unwrap()
});

/// Remote record fetches by result ("success", "status", "empty_body", ...).
pub static REMOTE_FETCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("bibu_remote_fetches_total", "Total remote record fetches"),
        &["source", "result"],
    )
    .unwrap()
});

/// All core metrics, for registration into a registry.
pub fn all_metrics() -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(CONVERSIONS_TOTAL.clone()),
        Box::new(CONVERSION_DURATION.clone()),
        Box::new(REMOTE_FETCHES_TOTAL.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_are_usable() {
        CONVERSIONS_TOTAL.with_label_values(&["success"]).inc();
        assert!(CONVERSIONS_TOTAL.with_label_values(&["success"]).get() >= 1);

        CONVERSION_DURATION.with_label_values(&["mock"]).observe(0.01);
        REMOTE_FETCHES_TOTAL
            .with_label_values(&["pmc", "success"])
            .inc();
    }

    #[test]
    fn test_all_metrics_can_be_registered() {
        let registry = prometheus::Registry::new();
        for metric in all_metrics() {
            registry.register(metric).unwrap();
        }
        CONVERSIONS_TOTAL.with_label_values(&["success"]).inc();
        let names: Vec<String> = registry
            .gather()
            .iter()
            .map(|family| family.get_name().to_string())
            .collect();
        assert!(names.contains(&"bibu_conversions_total".to_string()));
    }
}
