//! Shared helpers for reviewgate integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use reviewgate::api::{create_router, AppState};
use reviewgate::config::{CursorWrite, ReviewgateConfig};
use reviewgate::store::{Business, PlatformDraft, Store};
use serde_json::Value;
use std::sync::Arc;
use tower::Service;

/// Test app plus direct handles on its store and state.
pub struct TestApp {
    pub router: axum::Router,
    pub store: Arc<Store>,
    pub state: Arc<AppState>,
}

impl TestApp {
    /// App whose cursor writes finish before the response is returned.
    pub fn new() -> Self {
        let mut config = ReviewgateConfig::default();
        config.routing.cursor_write = CursorWrite::Awaited;
        Self::with_config(config)
    }

    pub fn with_config(config: ReviewgateConfig) -> Self {
        let store = Arc::new(Store::new());
        let state = Arc::new(AppState::new(Arc::clone(&store), Arc::new(config)));
        let router = create_router(Arc::clone(&state));
        Self {
            router,
            store,
            state,
        }
    }

    /// Create a business directly in the store with the given platforms.
    pub fn seed(&self, slug: &str, platforms: &[(&str, u32)]) -> Business {
        let business = self
            .store
            .create_business(&format!("Business {}", slug), slug, "owner@example.com")
            .unwrap();
        let drafts = platforms
            .iter()
            .map(|(name, weight)| {
                PlatformDraft::new(*name, format!("https://{}.example.com/review", name), *weight)
            })
            .collect();
        self.store.replace_platforms(&business.id, drafts).unwrap()
    }

    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.router.call(request).await.unwrap()
    }

    pub async fn send_json(&mut self, method: &str, uri: &str, body: Value) -> Response<Body> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.router.call(request).await.unwrap()
    }

    pub async fn post_empty(&mut self, uri: &str) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.router.call(request).await.unwrap()
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// `Location` header of a redirect response.
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect without Location header")
        .to_str()
        .unwrap()
        .to_string()
}
