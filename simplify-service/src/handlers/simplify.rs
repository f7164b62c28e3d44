use crate::error::SimplifyError;
use crate::models::{SimplifyRequest, SimplifyResponse};
use crate::services::metrics::{record_provider_error, record_provider_latency, record_request};
use crate::services::prompt::{build_segments, with_disclaimer};
use crate::startup::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use std::time::Instant;

/// `POST /simplify`: rewrite medical findings in plain language.
///
/// Empty input is rejected before the provider is touched. Otherwise the
/// provider is called exactly once and its answer is returned behind the
/// disclaimer.
#[tracing::instrument(name = "simplify", skip_all)]
pub async fn simplify(
    State(state): State<AppState>,
    payload: Result<Json<SimplifyRequest>, JsonRejection>,
) -> Result<Json<SimplifyResponse>, SimplifyError> {
    let Json(request) = payload.inspect_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected malformed request body");
        record_request("malformed_body");
    })?;

    let medical_text = request.medical_text();
    if medical_text.is_empty() {
        record_request("empty_scroll");
        return Err(SimplifyError::EmptyScroll);
    }

    let provider = &state.text_provider;
    let segments = build_segments(medical_text);

    let started = Instant::now();
    let result = provider.generate(&segments).await;
    let elapsed = started.elapsed();
    record_provider_latency(provider.name(), provider.model(), elapsed.as_secs_f64());

    match result {
        Ok(generated) => {
            tracing::info!(
                provider = provider.name(),
                model = provider.model(),
                input_len = medical_text.len(),
                output_len = generated.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Scroll simplified"
            );
            record_request("success");
            Ok(Json(SimplifyResponse {
                simplified_text: with_disclaimer(&generated),
            }))
        }
        Err(e) => {
            tracing::error!(
                provider = provider.name(),
                model = provider.model(),
                error_type = e.kind(),
                error = %e,
                "Text provider call failed"
            );
            record_provider_error(provider.name(), e.kind());
            record_request("upstream_error");
            Err(SimplifyError::Upstream(e))
        }
    }
}
