use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dialback_core::DialbackError;

/// Unified error type for HTTP responses.
///
/// Validation failures keep the `{"message": ...}` body shape the form page
/// expects; everything else is an opaque 500 with an `error` field.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(DialbackError::InvalidDelay) = self.0.downcast_ref::<DialbackError>() {
            let body = serde_json::json!({ "message": self.0.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
        }

        let body = serde_json::json!({ "error": self.0.to_string() });
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
