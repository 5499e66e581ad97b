//! HTTP API handlers — exposes the peer registry as JSON.

pub mod peers;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use rendezvous_services::{Registry, RegistryError};

#[derive(Clone)]
pub struct ApiState {
    pub registry: Registry,
}

impl ApiState {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Body of every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Validation failures are the caller's fault; everything else is ours.
fn registry_error(e: RegistryError) -> ApiError {
    match e {
        RegistryError::Validation => api_error(StatusCode::BAD_REQUEST, e.to_string()),
        RegistryError::Storage(_) => api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

// Re-export handler functions for use in router setup.
pub use peers::{handle_list_peers, handle_register};
