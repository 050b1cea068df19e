use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use ecotrack_common::EcoTrackError;
use thiserror::Error;
use tracing::error;

/// Handler errors, rendered as `{"message": ...}` with a matching status.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EcoTrackError> for ApiError {
    fn from(err: EcoTrackError) -> Self {
        match err {
            EcoTrackError::Validation(msg) => ApiError::BadRequest(msg),
            EcoTrackError::Conflict(msg) => ApiError::Conflict(msg),
            EcoTrackError::Config(_) => ApiError::Internal(anyhow::anyhow!(err)),
            EcoTrackError::Anyhow(e) => ApiError::Internal(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            error!(error = %e, "Request failed");
        }
        let status = self.status();
        (status, Json(serde_json::json!({ "message": self.to_string() }))).into_response()
    }
}
