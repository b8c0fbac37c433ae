// src/api/handlers.rs

use crate::api::{types::*, ApiState};
use crate::core::PredictionService;
use crate::features::SessionRecord;
use crate::infra::errors::ServiceError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

/// POST /predict — Score one session.
pub async fn predict(
    State(state): State<ApiState>,
    Json(session): Json<SessionRecord>,
) -> Result<Json<PredictionResponse>, (StatusCode, Json<ErrorResponse>)> {
    match PredictionService::new(&state.ctx).predict(&session) {
        Ok(result) => Ok(Json(result.into())),
        Err(e) => Err(error_response(e)),
    }
}

/// GET / — Static service description.
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        description: "Predicts the probability that a site session ends in a target action".into(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /health — Simple health check.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Caller mistakes become 422, everything else 500.
fn error_response(err: ServiceError) -> (StatusCode, Json<ErrorResponse>) {
    let status = if err.is_client_fault() {
        tracing::warn!("Rejected prediction request: {err}");
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        tracing::error!("Prediction failed: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorResponse {
            error: format!("Prediction error: {err}"),
        }),
    )
}
