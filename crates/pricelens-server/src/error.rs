use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use pricelens_core::error::AppError;

use crate::dto::ErrorResponse;

/// Wrapper so we can implement `IntoResponse` for `AppError`.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self.0 {
            AppError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message, None),
            AppError::UnsupportedSite(_) => {
                (StatusCode::BAD_REQUEST, "Website not supported".to_string(), None)
            }
            AppError::BlockedUrl(reason) => {
                (StatusCode::BAD_REQUEST, "URL not allowed".to_string(), Some(reason))
            }
            AppError::UpstreamUnavailable { site, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("{site} temporarily unavailable"),
                Some(details),
            ),
            other => {
                tracing::error!(error = %other, "Unexpected failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                    Some(other.to_string()),
                )
            }
        };

        (status, axum::Json(ErrorResponse { error, details })).into_response()
    }
}
