//! # HTTP API
//!
//! Review-link routing and business administration endpoints.
//!
//! ## Endpoints
//!
//! - `GET /review/{slug}` - Landing page payload, or `?sentiment=` routing
//! - `GET /feedback/{slug}` - Private feedback form descriptor
//! - `GET|POST /api/business` - List / create businesses
//! - `GET|PATCH|DELETE /api/business/{id}` - Read, update settings, delete
//! - `GET /api/business/{id}/feedback` - Feedback inbox of one business
//! - `POST /api/feedback` - Submit private feedback
//! - `POST /api/feedback/{id}/read` - Mark feedback as read
//! - `GET /health` - Liveness and store counts
//! - `GET /metrics` - Prometheus exposition
//!
//! ## Example
//!
//! ```no_run
//! use reviewgate::api::{create_router, AppState};
//! use reviewgate::config::ReviewgateConfig;
//! use reviewgate::store::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(Store::new());
//! let config = Arc::new(ReviewgateConfig::default());
//! let state = Arc::new(AppState::new(store, config));
//!
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Failures share one envelope:
//! ```json
//! {
//!   "error": {
//!     "message": "Total weight must equal 100% (currently 105%)",
//!     "type": "invalid_request_error",
//!     "param": "platforms",
//!     "code": "invalid_configuration"
//!   }
//! }
//! ```

mod business;
mod feedback;
mod health;
mod review;
pub mod types;

pub use types::*;

use crate::config::ReviewgateConfig;
use crate::metrics::MetricsCollector;
use crate::notify::{LogNotifier, Notifier};
use crate::routing::PlatformSelector;
use crate::store::{BusinessRepository, Store};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub store: Arc<Store>,
    pub config: Arc<ReviewgateConfig>,
    pub selector: Arc<PlatformSelector>,
    pub notifier: Arc<dyn Notifier>,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
    pub metrics_collector: Arc<MetricsCollector>,
}

impl AppState {
    /// Build state around a store. Feedback notifications go to the log
    /// until [`with_notifier`](Self::with_notifier) swaps the transport.
    pub fn new(store: Arc<Store>, config: Arc<ReviewgateConfig>) -> Self {
        let start_time = Instant::now();

        let repository: Arc<dyn BusinessRepository> = store.clone();
        let selector = Arc::new(
            PlatformSelector::new(repository).with_cursor_write(config.routing.cursor_write),
        );

        let notifier: Arc<dyn Notifier> =
            Arc::new(LogNotifier::new(config.logging.log_feedback_content));

        // Only the first state in a process owns the global recorder
        let prometheus_handle = crate::metrics::setup_metrics().unwrap_or_else(|e| {
            tracing::debug!("Metrics already initialized, using detached handle: {}", e);
            crate::metrics::detached_handle()
        });
        let metrics_collector = Arc::new(MetricsCollector::new(
            Arc::clone(&store),
            start_time,
            prometheus_handle,
        ));

        Self {
            store,
            config,
            selector,
            notifier,
            start_time,
            metrics_collector,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let server = &state.config.server;
    let timeout = Duration::from_secs(server.request_timeout_seconds);
    let max_body = server.max_body_bytes;

    Router::new()
        .route("/review/:slug", get(review::handle))
        .route("/feedback/:slug", get(feedback::form))
        .route("/api/business", get(business::list).post(business::create))
        .route(
            "/api/business/:id",
            get(business::get_one)
                .patch(business::update)
                .delete(business::remove),
        )
        .route("/api/business/:id/feedback", get(business::feedback))
        .route("/api/feedback", post(feedback::create))
        .route("/api/feedback/:id/read", post(feedback::mark_read))
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(crate::logging::request_id))
        .with_state(state)
}
