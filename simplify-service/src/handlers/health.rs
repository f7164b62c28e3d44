use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Value};
use service_core::error::AppError;

/// Liveness probe. Never calls the provider.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "simplify-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe: ready when the text provider answers its health check.
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.text_provider.health_check().await.map_err(|e| {
        tracing::warn!(
            provider = state.text_provider.name(),
            error = %e,
            "Text provider health check failed"
        );
        AppError::ServiceUnavailable
    })?;

    Ok(Json(json!({
        "status": "ready",
        "provider": state.text_provider.name(),
        "model": state.text_provider.model()
    })))
}
