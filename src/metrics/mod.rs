//! # Metrics Collection Module
//!
//! Prometheus export of review-routing activity at `GET /metrics`.
//!
//! **Counters:**
//! - `reviewgate_selections_total{mode}` - Happy-visit platform selections
//! - `reviewgate_visits_total{sentiment}` - Review-link visits by sentiment
//! - `reviewgate_feedback_total{rating}` - Private feedback submissions
//!
//! **Gauges:**
//! - `reviewgate_businesses_total` - Businesses in the store
//! - `reviewgate_platforms_active` - Platforms with positive weight

pub mod handler;

pub use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::store::{FeedbackRating, Sentiment, Store};
use std::sync::Arc;
use std::time::Instant;

/// Computes store-derived gauges and renders the Prometheus exposition.
pub struct MetricsCollector {
    store: Arc<Store>,
    start_time: Instant,
    prometheus_handle: PrometheusHandle,
}

impl MetricsCollector {
    pub fn new(store: Arc<Store>, start_time: Instant, prometheus_handle: PrometheusHandle) -> Self {
        Self {
            store,
            start_time,
            prometheus_handle,
        }
    }

    /// Refresh gauges from the current store contents.
    pub fn update_tenant_gauges(&self) {
        let businesses = self.store.list_businesses();
        metrics::gauge!("reviewgate_businesses_total").set(businesses.len() as f64);

        let active: usize = businesses.iter().map(|b| b.active_platform_count()).sum();
        metrics::gauge!("reviewgate_platforms_active").set(active as f64);
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn render_metrics(&self) -> String {
        self.prometheus_handle.render()
    }
}

/// Count a review-link visit.
pub fn record_visit(sentiment: Option<Sentiment>) {
    let label = sentiment.map(|s| s.as_str()).unwrap_or("none");
    metrics::counter!("reviewgate_visits_total", "sentiment" => label).increment(1);
}

/// Count a stored feedback submission.
pub fn record_feedback(rating: FeedbackRating) {
    metrics::counter!("reviewgate_feedback_total", "rating" => rating.as_str()).increment(1);
}

/// Install the global Prometheus recorder.
///
/// Fails if a recorder is already installed; callers fall back to
/// [`detached_handle`].
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    Ok(handle)
}

/// A handle backed by a recorder that is not installed globally.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}
