//! HTTP error responses.
//!
//! Every failure renders as `{"error": "<message>"}` with a matching status.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use krishimitra_core::KrishiError;
use serde_json::json;

/// Message for a request without a `file` part.
pub const NO_FILE_UPLOADED: &str = "No file uploaded";

#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!("Internal error: {}", message);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<KrishiError> for ApiError {
    fn from(err: KrishiError) -> Self {
        if err.is_client_error() {
            Self::bad_request(err.to_string())
        } else {
            Self::internal(err.to_string())
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::new(err.status(), err.body_text())
    }
}

/// A body that is not multipart at all carries no `file` field.
impl From<MultipartRejection> for ApiError {
    fn from(_: MultipartRejection) -> Self {
        Self::bad_request(NO_FILE_UPLOADED)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_problems_are_bad_requests() {
        let err = ApiError::from(KrishiError::InvalidUpload("No file selected".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "No file selected");

        let err = ApiError::from(KrishiError::UnsupportedMedia("text/plain".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Unsupported file type: text/plain");
    }

    #[test]
    fn service_failures_are_internal() {
        let err = ApiError::from(KrishiError::Classifier("connection refused".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().contains("connection refused"));
    }
}
