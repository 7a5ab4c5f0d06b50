use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rialto::RialtoError;
use serde_json::json;

/// A [`RialtoError`] rendered as `{"error": message}` with a matching status.
#[derive(Debug)]
pub struct ApiError(pub RialtoError);

impl ApiError {
    /// Status code for the wrapped error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match &self.0 {
            RialtoError::InvalidArg(_) => StatusCode::BAD_REQUEST,
            RialtoError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RialtoError> for ApiError {
    fn from(e: RialtoError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self.0, retryable = self.0.is_retryable(), "request failed");
        }
        let body = json!({ "error": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}
