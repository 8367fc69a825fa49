//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Catalog requests (count by status, duration, result sizes)
//! - Search debouncing (superseded timers)
//! - Collection size

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Catalog requests total by status.
pub static CATALOG_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "cardbinder_catalog_requests_total",
            "Total card catalog requests",
        ),
        &["status"], // "success", "error"
    )
    .unwrap()
});

/// Catalog request duration in seconds.
pub static CATALOG_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "cardbinder_catalog_request_duration_seconds",
            "Duration of card catalog requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["status"],
    )
    .unwrap()
});

/// Cards returned per search.
pub static SEARCH_RESULTS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "cardbinder_search_results",
            "Number of cards returned per search",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]),
        &[],
    )
    .unwrap()
});

// =============================================================================
// Search Controller Metrics
// =============================================================================

/// Pending debounce timers replaced by a newer keystroke.
pub static DEBOUNCE_CANCELLATIONS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "cardbinder_debounce_cancellations_total",
        "Pending searches superseded before their timer fired",
    )
    .unwrap()
});

/// Failed searches whose error was swallowed.
pub static SEARCH_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "cardbinder_search_failures_total",
        "Searches that failed and left previous results in place",
    )
    .unwrap()
});

// =============================================================================
// Collection Metrics
// =============================================================================

/// Current number of cards in the collection.
pub static COLLECTION_SIZE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "cardbinder_collection_size",
        "Number of cards in the collection",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Catalog
        Box::new(CATALOG_REQUESTS.clone()),
        Box::new(CATALOG_REQUEST_DURATION.clone()),
        Box::new(SEARCH_RESULTS.clone()),
        // Search
        Box::new(DEBOUNCE_CANCELLATIONS.clone()),
        Box::new(SEARCH_FAILURES.clone()),
        // Collection
        Box::new(COLLECTION_SIZE.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::Registry;

    #[test]
    fn test_all_metrics_register() {
        let registry = Registry::new();
        for metric in all_metrics() {
            registry.register(metric).unwrap();
        }
        // Vec metrics only show up once a label set has been observed.
        CATALOG_REQUESTS.with_label_values(&["success"]).inc_by(0);
        let names: Vec<String> = registry
            .gather()
            .iter()
            .map(|f| f.get_name().to_string())
            .collect();
        assert!(names.contains(&"cardbinder_catalog_requests_total".to_string()));
        assert!(names.contains(&"cardbinder_collection_size".to_string()));
    }
}
