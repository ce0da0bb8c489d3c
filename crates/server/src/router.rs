//! HTTP router construction.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::api;
use crate::state::AppState;

/// Build the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>, cors_origin: &str) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/risk_scores", get(api::risk_scores))
        .layer(cors_layer(cors_origin))
        .with_state(state)
}

/// `*` allows any origin; anything else is a single allowed origin.
fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods([Method::GET])
            .allow_headers(Any),
        Err(e) => {
            warn!(origin, error = %e, "invalid CORS origin, cross-origin requests disabled");
            CorsLayer::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use riskscope_compute::RiskPipeline;
    use riskscope_core::schema::*;
    use riskscope_core::{Dataset, Record};

    fn user(id: &str, files: f64, logins: f64, usb: f64, net: f64, unauth: f64) -> Record {
        Record::new(id)
            .with(FILES_ACCESSED, files)
            .with(LOGIN_COUNT, logins)
            .with(REMOTE_LOGIN, 0.0)
            .with(USB_USAGE, usb)
            .with(NETWORK_ACTIVITY, net)
            .with(UNAUTHORIZED_ACCESS, unauth)
    }

    fn app_with(records: Vec<Record>) -> Router {
        let state = AppState::new(Dataset::with_schema_columns(records), RiskPipeline::default());
        build_router(Arc::new(state), "*")
    }

    fn app() -> Router {
        let mut records: Vec<Record> = (0..12)
            .map(|i| user(&format!("U{i:02}"), 10.0 + i as f64, 4.0, 0.0, 300.0 + i as f64, 0.0))
            .collect();
        records.push(user("UX", 120.0, 30.0, 1.0, 8000.0, 3.0));
        app_with(records)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_records_and_mode() {
        let (status, body) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["schema_version"], 1);
        assert_eq!(body["records"], 13);
        assert_eq!(body["mode"], "iforest");
    }

    #[tokio::test]
    async fn risk_scores_default_model() {
        let (status, body) = get_json(app(), "/api/risk_scores").await;
        assert_eq!(status, StatusCode::OK);
        let results = body.as_array().unwrap();
        assert_eq!(results.len(), 13);
        assert_eq!(results[0]["id"], "U00");

        let last = &results[12];
        assert_eq!(last["id"], "UX");
        assert_eq!(last["score"], 55);
        assert_eq!(last["status"], "suspicious");
        assert_eq!(last["outlier"], true);
        assert_eq!(last["reasons"][0], "High network usage");
        assert!(last.get("ip").is_none());
        assert_eq!(results[0]["recommendations"][0], "No immediate action");
    }

    #[tokio::test]
    async fn random_model_is_reproducible_with_seed() {
        let uri = "/api/risk_scores?model=random&seed=11";
        let (status, first) = get_json(app(), uri).await;
        assert_eq!(status, StatusCode::OK);
        let (_, second) = get_json(app(), uri).await;
        assert_eq!(first, second);
        assert!(first
            .as_array()
            .unwrap()
            .iter()
            .all(|r| r["outlier"] == false));
    }

    #[tokio::test]
    async fn model_name_is_case_insensitive() {
        let (status, _) = get_json(app(), "/api/risk_scores?model=IFOREST").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_model_is_bad_request() {
        let (status, body) = get_json(app(), "/api/risk_scores?model=svm").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("svm"));
    }

    #[tokio::test]
    async fn malformed_seed_is_json_bad_request() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/risk_scores?seed=abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["content-type"], "application/json");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].as_str().unwrap().contains("seed"));
    }

    #[tokio::test]
    async fn empty_model_falls_back_to_configured_mode() {
        let (status, first) = get_json(app(), "/api/risk_scores?model=").await;
        assert_eq!(status, StatusCode::OK);
        let (_, default) = get_json(app(), "/api/risk_scores").await;
        assert_eq!(first, default);
    }

    #[tokio::test]
    async fn single_record_is_unprocessable_for_forest() {
        let app = app_with(vec![user("only", 1.0, 1.0, 0.0, 10.0, 0.0)]);
        let (status, body) = get_json(app, "/api/risk_scores").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("Insufficient data"));
    }

    #[tokio::test]
    async fn single_record_scores_in_random_mode() {
        let app = app_with(vec![user("only", 1.0, 1.0, 0.0, 10.0, 0.0)]);
        let (status, body) = get_json(app, "/api/risk_scores?model=random").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["score"], 30);
    }

    #[tokio::test]
    async fn configured_origin_is_echoed() {
        let state = AppState::new(Dataset::default(), RiskPipeline::default());
        let app = build_router(Arc::new(state), "https://dashboard.example.com");
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "https://dashboard.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "https://dashboard.example.com"
        );
    }
}
