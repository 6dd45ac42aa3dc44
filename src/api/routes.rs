//! REST endpoints for the assistant service.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::assistant::{
    AnalysisResult, AnalyzeRequest, AssistantService, CaptureResult, StatusSnapshot,
};
use crate::error::{AnalysisError, CaptureError};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<AssistantService>,
}

/// Build the Axum router with the assistant REST routes.
pub fn api_routes(assistant: Arc<AssistantService>) -> Router {
    let state = AppState { assistant };

    Router::new()
        .route("/health", get(health))
        .route("/api/status", get(get_status))
        .route("/api/capture", post(capture))
        .route("/api/analyze", post(analyze))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Errors ──────────────────────────────────────────────────────────────

/// Failure at the HTTP boundary. Callers only ever see the fixed message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to capture screen")]
    Capture(#[source] CaptureError),

    #[error("Failed to analyze with AI")]
    Analysis(#[source] AnalysisError),

    #[error("Invalid request body")]
    BadRequest(#[source] serde_json::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Capture(_) | Self::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Capture(e) => error!(error = %e, "Capture failed"),
            Self::Analysis(e) => error!(error = %e, "Analysis failed"),
            Self::BadRequest(e) => warn!(error = %e, "Rejected analyze request body"),
        }
        (
            self.status_code(),
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

// ── Handlers ────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "spectro"
    }))
}

/// GET /api/status
async fn get_status(State(state): State<AppState>) -> Json<StatusSnapshot> {
    Json(state.assistant.status())
}

/// POST /api/capture
///
/// Any request body is ignored.
async fn capture(State(state): State<AppState>) -> Result<Json<CaptureResult>, ApiError> {
    let result = state.assistant.capture().await.map_err(ApiError::Capture)?;
    info!(timestamp = %result.timestamp, "Screen captured");
    Ok(Json(result))
}

/// POST /api/analyze
///
/// Body is `{"input": ...}`; an empty body is the same as `{}`. The body is
/// parsed regardless of content type.
async fn analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalysisResult>, ApiError> {
    let request = parse_analyze_request(&body)?;
    let result = state
        .assistant
        .analyze(request.input)
        .await
        .map_err(ApiError::Analysis)?;
    info!(confidence = result.confidence, "Analysis complete");
    Ok(Json(result))
}

fn parse_analyze_request(body: &[u8]) -> Result<AnalyzeRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AnalyzeRequest::default());
    }
    serde_json::from_slice(body).map_err(ApiError::BadRequest)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::assistant::{
        Analysis, AnalysisInput, Analyzer, PlaceholderAnalyzer, PlaceholderCapturer,
        ScreenCapturer,
    };
    use crate::config::AssistantConfig;

    struct BrokenCapturer;

    #[async_trait]
    impl ScreenCapturer for BrokenCapturer {
        fn name(&self) -> &str {
            "broken"
        }
        async fn capture(&self) -> Result<Value, CaptureError> {
            Err(CaptureError::Failed("display server went away".to_string()))
        }
    }

    struct BrokenAnalyzer;

    #[async_trait]
    impl Analyzer for BrokenAnalyzer {
        fn name(&self) -> &str {
            "broken"
        }
        async fn analyze(&self, _input: &AnalysisInput) -> Result<Analysis, AnalysisError> {
            Err(AnalysisError::Failed("provider returned 503".to_string()))
        }
    }

    fn router() -> Router {
        api_routes(Arc::new(AssistantService::placeholder(
            AssistantConfig::default(),
        )))
    }

    fn router_with(capturer: Arc<dyn ScreenCapturer>, analyzer: Arc<dyn Analyzer>) -> Router {
        api_routes(Arc::new(AssistantService::new(
            AssistantConfig::default(),
            capturer,
            analyzer,
        )))
    }

    fn post(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn status_route_returns_snapshot() {
        let req = Request::builder()
            .uri("/api/status")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"SYSTEM_ACTIVE": true, "INTERFACE_VERSION": "2.3.7", "STATUS": "ONLINE"})
        );
    }

    #[tokio::test]
    async fn capture_route_ignores_body() {
        let (status, body) = send(router(), post("/api/capture", "not json")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "screenshot");
    }

    #[tokio::test]
    async fn analyze_route_accepts_empty_body() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["confidence"], 0.95);
    }

    #[tokio::test]
    async fn analyze_route_rejects_malformed_body() {
        let (status, body) = send(router(), post("/api/analyze", "{\"input\":")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid request body"}));

        let (status, _) = send(router(), post("/api/analyze", "\"just a string\"")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn capture_failure_maps_to_fixed_500() {
        let app = router_with(Arc::new(BrokenCapturer), Arc::new(PlaceholderAnalyzer));
        let (status, body) = send(app, post("/api/capture", "")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to capture screen"}));
    }

    #[tokio::test]
    async fn analysis_failure_maps_to_fixed_500() {
        let app = router_with(Arc::new(PlaceholderCapturer), Arc::new(BrokenAnalyzer));
        let (status, body) = send(app, post("/api/analyze", r#"{"input": "x"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to analyze with AI"}));
    }

    #[tokio::test]
    async fn implicit_capture_failure_reports_analysis_error() {
        let app = router_with(Arc::new(BrokenCapturer), Arc::new(PlaceholderAnalyzer));
        let (status, body) = send(app, post("/api/analyze", r#"{"input": null}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to analyze with AI"}));
    }

    #[tokio::test]
    async fn health_route() {
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "spectro");
    }
}
