//! HTTP surface: the generation endpoint behind an axum router.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use crate::error::{ErrorKind, GenerationError};
use crate::gateway::{GenerationGateway, GenerationRequest};
use crate::types::{ErrorResponse, GenerateImagePayload, GenerateImageResponse};

/// Path of the generation endpoint.
pub const GENERATE_PATH: &str = "/api/generate-image";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// The generation gateway.
    pub gateway: Arc<GenerationGateway>,
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(GENERATE_PATH, get(usage).post(generate_image).options(preflight))
        .route("/health", get(health))
        .layer(middleware::map_response(with_cors_headers))
        .with_state(state)
}

/// Serve `router` on `listener` until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections.
pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Listening on http://{addr}");
    }
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

/// Every response, errors included, is readable from any origin.
async fn with_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    response
}

/// POST /api/generate-image
async fn generate_image(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: GenerateImagePayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::debug!("Rejected request body: {e}");
            let body = ErrorResponse {
                details: Some(json!(e.to_string())),
                ..ErrorResponse::message("Invalid JSON body")
            };
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    let request = GenerationRequest::from(payload);
    match state.gateway.generate(&request).await {
        Ok(generated) => Json(GenerateImageResponse::from(generated)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /api/generate-image - describes the payload.
async fn usage(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "ok": true,
        "usage": format!("POST JSON to this endpoint to generate images with {}.", state.gateway.model()),
        "payload": {
            "prompt": "string (required)",
            "ratio": "optional: '1:1' | '16:9' | '9:16' | '4:3' | '3:4'",
            "size": "optional: 'WIDTHxHEIGHT'",
            "style": "optional: label shown with the result",
            "referenceImageUrl": "optional: URL",
            "editMaskUrl": "optional: URL (requires referenceImageUrl)",
        },
    }))
}

/// OPTIONS /api/generate-image
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// HTTP status reported to the caller for a failed generation.
#[must_use]
pub fn status_for(err: &GenerationError) -> StatusCode {
    match err.kind() {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::Misconfigured | ErrorKind::TransportError => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::ProviderError => err
            .provider_status()
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::BAD_GATEWAY),
        ErrorKind::UnparsableResponse => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for GenerationError {
    fn into_response(self) -> Response {
        (status_for(&self), Json(ErrorResponse::from(&self))).into_response()
    }
}
