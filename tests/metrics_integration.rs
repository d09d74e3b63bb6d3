//! Integration test for the Prometheus endpoint.
//!
//! The `metrics` crate allows one global recorder per process, and only the
//! first `AppState` built in a process owns it. This file therefore holds a
//! single test so its app is guaranteed to be that first state.

mod common;

use axum::http::StatusCode;
use common::{body_text, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_metrics_track_routing_activity() {
    let mut app = TestApp::new();
    let business = app.seed("cafe", &[("a", 50), ("b", 50)]);
    app.seed("weighted", &[("a", 20), ("b", 30)]);
    app.seed("dormant", &[("a", 0)]);

    // Endpoint answers before any activity
    let response = app.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    app.get("/review/cafe").await;
    app.get("/review/cafe?sentiment=happy").await;
    app.get("/review/cafe?sentiment=happy").await;
    app.get("/review/weighted?sentiment=happy").await;
    app.get("/review/cafe?sentiment=sad").await;
    app.send_json(
        "POST",
        "/api/feedback",
        json!({
            "businessId": business.id,
            "name": "Ann",
            "email": "ann@example.com",
            "message": "Too noisy",
            "rating": "neutral",
            "stars": 3
        }),
    )
    .await;

    let text = body_text(app.get("/metrics").await).await;

    assert!(text.contains("reviewgate_visits_total"));
    assert!(text.contains("sentiment=\"none\""));
    assert!(text.contains("sentiment=\"happy\""));
    assert!(text.contains("sentiment=\"sad\""));

    assert!(text.contains("reviewgate_selections_total"));
    assert!(text.contains("mode=\"round_robin\""));
    assert!(text.contains("mode=\"weighted_random\""));

    assert!(text.contains("reviewgate_feedback_total"));
    assert!(text.contains("rating=\"neutral\""));

    assert!(text.contains("reviewgate_businesses_total 3"));
    assert!(text.contains("reviewgate_platforms_active 4"));
}
