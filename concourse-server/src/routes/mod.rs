//! HTTP surface of the routing engine

pub mod api;

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{BoxError, Json, Router};
use concourse_core::Error;
use serde_json::json;
use tower::ServiceBuilder;
use tower::limit::ConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Request limits applied in front of every handler
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub request_timeout: Duration,
    pub max_concurrent_requests: usize,
}

pub fn router(state: AppState, limits: Limits) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(api::health))
        .route("/api/points", get(api::list_points))
        .route("/api/route", get(api::get_route))
        .route("/api/route/nearest", get(api::get_nearest_route))
        .route("/api/floors/{floor}/nearest", get(api::get_nearest_point))
        .route("/api/admin/reload", post(api::reload))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(ConcurrencyLimitLayer::new(limits.max_concurrent_requests))
                .layer(TimeoutLayer::new(limits.request_timeout)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::Timeout.into_response()
    } else {
        tracing::error!("Unhandled middleware error: {err}");
        ApiError::Internal(err.to_string()).into_response()
    }
}

#[derive(Debug)]
pub enum ApiError {
    Core(Error),
    NotFound(String),
    Timeout,
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Core(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Core(err @ Error::InvalidRequest(_)) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Core(err @ Error::UnknownPoint(_)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Core(err) => {
                tracing::error!("Request failed: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "Request took too long".to_string(),
            ),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request};
    use concourse_core::routing::Frontier;
    use concourse_core::{BuildingModelConfig, GraphStore};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    fn terminal_config() -> BuildingModelConfig {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../concourse-core/tests/data/terminal");
        BuildingModelConfig::new(dir.join("manifest.json")).with_points(dir.join("points.csv"))
    }

    fn app_with(store: GraphStore) -> Router {
        let state = AppState::new(Arc::new(store), Frontier::BinaryHeap);
        router(
            state,
            Limits {
                request_timeout: Duration::from_secs(5),
                max_concurrent_requests: 8,
            },
        )
    }

    fn app() -> Router {
        app_with(GraphStore::open(terminal_config()))
    }

    async fn call(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_snapshot() {
        let (status, body) = call(app(), Method::GET, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["loaded"], true);
        assert_eq!(body["generation"], 1);
        assert_eq!(body["floors"], 2);
    }

    #[tokio::test]
    async fn route_between_points() {
        let (status, body) = call(app(), Method::GET, "/api/route?from=5&to=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["distance"], 853.0);
        assert_eq!(body["path"][0]["nodeId"], "entrance");
        assert_eq!(body["path"][5]["pointId"], 2);
        assert!(body["walkingMinutes"].as_f64().unwrap() > 1.0);
    }

    #[tokio::test]
    async fn step_free_route() {
        let (status, body) =
            call(app(), Method::GET, "/api/route?from=5&to=2&step_free=true").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["distance"], 1250.0);
    }

    #[tokio::test]
    async fn route_errors_map_to_status_codes() {
        let (status, body) = call(app(), Method::GET, "/api/route?from=5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Missing from/to"));

        let (status, _) = call(app(), Method::GET, "/api/route?from=abc&to=2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(app(), Method::GET, "/api/route?from=0&to=2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(app(), Method::GET, "/api/route?from=5&to=4000").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unloaded_store_answers_unreachable() {
        let missing = BuildingModelConfig::new("/nonexistent/manifest.json");
        let app = app_with(GraphStore::open(missing));

        let (status, body) = call(app.clone(), Method::GET, "/api/route?from=1&to=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["distance"], Value::Null);
        assert_eq!(body["path"], Value::Array(vec![]));

        let (status, body) = call(app.clone(), Method::GET, "/api/points").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Array(vec![]));

        let (status, _) = call(app, Method::POST, "/api/admin/reload").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn nearest_by_category_and_position() {
        let (status, body) = call(
            app(),
            Method::GET,
            "/api/route/nearest?from=5&category=restaurant",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["path"].as_array().unwrap().last().unwrap()["nodeId"], "cafe");

        let (status, body) = call(app(), Method::GET, "/api/floors/F1/nearest?x=880&y=120").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "A1");
        assert_eq!(body["id"], 1);

        let (status, _) = call(app(), Method::GET, "/api/floors/F9/nearest?x=0&y=0").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_finite_position_is_a_bad_request() {
        for uri in [
            "/api/floors/F1/nearest?x=NaN&y=0",
            "/api/floors/F1/nearest?x=0&y=inf",
            "/api/floors/F1/nearest?x=abc&y=0",
            "/api/floors/F1/nearest?y=0",
        ] {
            let (status, body) = call(app(), Method::GET, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body["error"].is_string(), "{uri}");
        }
    }

    #[tokio::test]
    async fn malformed_step_free_flag_is_a_json_bad_request() {
        let (status, body) = call(app(), Method::GET, "/api/route?from=5&to=2&step_free=yes").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("step_free"));

        let (status, body) = call(
            app(),
            Method::GET,
            "/api/route/nearest?from=5&category=gate&step_free=maybe",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = call(app(), Method::GET, "/api/route?from=5&to=2&step_free=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["distance"], 1250.0);
    }

    #[tokio::test]
    async fn points_and_reload() {
        let app = app();
        let (status, body) = call(app.clone(), Method::GET, "/api/points").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 13);
        assert_eq!(body[2]["name"], "Cafe Central");

        let (status, body) = call(app, Method::POST, "/api/admin/reload").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["generation"], 2);
    }
}
