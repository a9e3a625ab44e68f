pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::puzzle::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> Result<(), AppError> {
    Err(AppError::NotFound(format!("No route for {uri}")))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Puzzle API
        .route("/api/v1/puzzles", post(handlers::handle_build_puzzle))
        .route(
            "/api/v1/puzzles/validate",
            post(handlers::handle_validate_puzzle),
        )
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::puzzle::clock::{FixedClock, FixedIdGenerator};
    use crate::puzzle::{BuildLimits, PuzzleBuilder};

    fn make_state() -> AppState {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap();
        AppState {
            config: Config::default(),
            builder: PuzzleBuilder::new(
                Arc::new(FixedClock(at)),
                Arc::new(FixedIdGenerator("pz-route".to_string())),
                BuildLimits::default(),
            ),
        }
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = build_router(make_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_ok() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = build_router(make_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_build_puzzle_returns_artifact() {
        let (status, body) = post_json(
            "/api/v1/puzzles",
            json!({ "phrase": "ghost-white", "min_width": 11, "max_width": 11, "author": "ada" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["schema"], "0.3");
        assert_eq!(body["id"], "pz-route");
        assert_eq!(body["cols"], 11);
        assert_eq!(body["solution"], json!(["GHOST WHITE"]));
        assert_eq!(body["overlay"], json!([{ "row": 0, "col": 5, "ch": "-" }]));
        assert_eq!(body["meta"]["date"], "2024-03-09");
        assert!(body.get("debug").is_none());
    }

    #[tokio::test]
    async fn test_build_puzzle_uses_default_width_range() {
        let (status, body) =
            post_json("/api/v1/puzzles", json!({ "phrase": "hi", "debug": true })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cols"], 14);
        assert_eq!(body["debug"]["widths"].as_array().unwrap().len(), 11);
    }

    #[tokio::test]
    async fn test_build_puzzle_pin_conflict_is_422() {
        let (status, body) = post_json(
            "/api/v1/puzzles",
            json!({
                "phrase": "DON'T STOP",
                "min_width": 10,
                "max_width": 10,
                "pins": [{ "row": 3, "raw_index": 0, "target_col": 0 }]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "PIN_CONFLICT");
        assert_eq!(body["error"]["detail"]["row"], 3);
        assert_eq!(body["error"]["detail"]["problem"]["reason"], "no_such_row");
    }

    #[tokio::test]
    async fn test_build_puzzle_empty_phrase_is_422() {
        let (status, body) = post_json("/api/v1/puzzles", json!({ "phrase": "   " })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "EMPTY_PHRASE");
    }

    #[tokio::test]
    async fn test_build_puzzle_blank_id_is_400() {
        let (status, body) =
            post_json("/api/v1/puzzles", json!({ "phrase": "hello", "id": "   " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_OPTIONS");
    }

    #[tokio::test]
    async fn test_validate_round_trips_built_artifact() {
        let (_, built) = post_json(
            "/api/v1/puzzles",
            json!({ "phrase": "He lived at 123 Baker Street." }),
        )
        .await;
        let (status, body) = post_json("/api/v1/puzzles/validate", built).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["passed"], true);
    }

    #[tokio::test]
    async fn test_validate_rejects_unknown_schema() {
        let (status, body) = post_json(
            "/api/v1/puzzles/validate",
            json!({ "schema": "9.9", "id": "x", "rows": 0, "cols": 0, "solution": [], "overlay": [] }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "SCHEMA_UNSUPPORTED");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, body) = post_json("/api/v1/nope", json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
