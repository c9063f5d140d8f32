//! Axum route handlers for the Structor gateway API.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use structor_sandbox::{Method, SandboxFacade};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{error::GatewayError, mounts::AxumServer};

// ── Shared state ─────────────────────────────────────────────────────────────

type Facade = Arc<SandboxFacade>;

// ── Request / response types ──────────────────────────────────────────────────

/// Body of `POST /sandbox/invoke`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeRequest {
    pub method_name: String,
    /// Options record for the method. Absent means no options.
    #[serde(default)]
    pub data: Value,
}

/// Successful invocation result.
#[derive(Debug, Serialize)]
pub struct InvokeResponse {
    pub data: Value,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router around `facade`.
///
/// The facade's preview mount and screenshot upload are registered here, so
/// the router must be built once per facade.
pub fn create_router(facade: Facade) -> Router {
    let api = Router::new()
        .route("/sandbox/invoke", post(invoke))
        .route("/health", get(health))
        .with_state(Arc::clone(&facade));

    let mut server = AxumServer::new(api);
    facade.set_server(Some(&mut server));

    server
        .into_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health`: liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `POST /sandbox/invoke`: run a sandbox operation.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] for a malformed body, otherwise
/// whatever the operation fails with.
pub async fn invoke(
    State(facade): State<Facade>,
    body: Result<Json<InvokeRequest>, JsonRejection>,
) -> Result<Json<InvokeResponse>, GatewayError> {
    let Json(body) = body.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    let method: Method = body.method_name.parse()?;
    let data = facade.dispatch(method, body.data).await?;
    Ok(Json(InvokeResponse { data }))
}
