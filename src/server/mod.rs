//! HTTP surface: `GET /health` and `POST /generate`.

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::ProviderError;
use crate::service::{GenerateRequest, Outcome, ServiceError, SignalService};

pub const API_KEY_HEADER: &str = "x-api-key";
pub const NO_SIGNAL_HEADER: &str = "x-no-signal-reason";

pub type AppState = Arc<SignalService>;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Provider(ProviderError::MissingConfig(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ServiceError::Provider(_) | ServiceError::Malformed(_) => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/generate", post(generate))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn generate(
    State(svc): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let expected = svc.config().api_key.as_bytes();
    let supplied = headers
        .get(API_KEY_HEADER)
        .map(|v| v.as_bytes())
        .unwrap_or_default();
    if expected.is_empty() || !keys_match(supplied, expected) {
        return Err(ApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized"));
    }

    let req: GenerateRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    match svc.generate(&req).await? {
        Outcome::Signal(record) => Ok(Json(record).into_response()),
        Outcome::NoSignal(reason) => {
            let mut resp = StatusCode::NO_CONTENT.into_response();
            if let Ok(v) = HeaderValue::from_str(&reason.to_string()) {
                resp.headers_mut().insert(NO_SIGNAL_HEADER, v);
            }
            Ok(resp)
        }
    }
}

/// Compares every byte so the time taken does not reveal the matching prefix.
fn keys_match(supplied: &[u8], expected: &[u8]) -> bool {
    supplied.len() == expected.len()
        && supplied
            .iter()
            .zip(expected)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutting down");
        })
        .await
        .context("Server error")
}
