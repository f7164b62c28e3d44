use crate::services::prompt::{EMPTY_SCROLL_MESSAGE, UPSTREAM_FAILURE_MESSAGE};
use crate::services::providers::ProviderError;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use service_core::error::AppError;
use thiserror::Error;

/// Ways a simplify request can fail.
#[derive(Debug, Error)]
pub enum SimplifyError {
    #[error("{}", EMPTY_SCROLL_MESSAGE)]
    EmptyScroll,

    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),

    #[error("Upstream generation failed: {0}")]
    Upstream(#[from] ProviderError),
}

impl From<SimplifyError> for AppError {
    fn from(err: SimplifyError) -> Self {
        match err {
            SimplifyError::EmptyScroll => {
                AppError::BadRequest(anyhow::anyhow!(EMPTY_SCROLL_MESSAGE))
            }
            SimplifyError::MalformedBody(rejection) => {
                AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
            }
            // Provider detail is logged by the handler, never sent to the caller.
            SimplifyError::Upstream(_) => {
                AppError::UpstreamFailure(UPSTREAM_FAILURE_MESSAGE.to_string())
            }
        }
    }
}

impl IntoResponse for SimplifyError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            SimplifyError::EmptyScroll.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SimplifyError::Upstream(ProviderError::RateLimited)
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_detail_not_in_app_error() {
        let err = AppError::from(SimplifyError::Upstream(ProviderError::ApiError(
            "quota exceeded for key AIza...".to_string(),
        )));
        match err {
            AppError::UpstreamFailure(msg) => assert_eq!(msg, UPSTREAM_FAILURE_MESSAGE),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
