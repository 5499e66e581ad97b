//! / handlers — peer listing and registration.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use rendezvous_services::RegistryError;

use super::{api_error, registry_error, ApiError, ApiState};

// ── / (GET) ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PeersResponse {
    pub peers: Vec<String>,
}

pub async fn handle_list_peers(
    State(state): State<ApiState>,
) -> Result<Json<PeersResponse>, ApiError> {
    let peers = state.registry.list_peers().map_err(|e| {
        tracing::error!(error = %e, "failed to list peers");
        registry_error(e)
    })?;

    tracing::debug!(?peers, "peers");
    Ok(Json(PeersResponse { peers }))
}

// ── / (POST) ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub status: String,
}

pub async fn handle_register(
    State(state): State<ApiState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, ApiError> {
    // An unreadable body carries no usable fields.
    let Json(req) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected register body");
        api_error(StatusCode::BAD_REQUEST, RegistryError::Validation.to_string())
    })?;

    state
        .registry
        .register(&req.session_id, &req.address)
        .map_err(|e| {
            if let RegistryError::Storage(_) = e {
                tracing::error!(error = %e, "failed to register peer");
            }
            registry_error(e)
        })?;

    Ok(Json(RegisterResponse {
        status: "ok".to_string(),
    }))
}
