//! HTTP error taxonomy and the response envelope.
//!
//! Every domain outcome maps to exactly one `ApiError` variant, and every
//! variant to exactly one status code. Bodies always carry the same envelope:
//! `{"success": bool, "message": ..., "data": ...}` with `data` omitted when
//! there is nothing to return.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ferrobank_core::DomainError;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Insufficient balance.")]
    InsufficientFunds,
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InsufficientFunds => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(_) | DomainError::InvalidId(_) | DomainError::SelfTransfer => {
                Self::Validation(err.to_string())
            }
            DomainError::NotFound | DomainError::RecipientNotFound => {
                Self::NotFound(err.to_string())
            }
            DomainError::InsufficientFunds => Self::InsufficientFunds,
            DomainError::Conflict(msg) => Self::Conflict(msg),
            DomainError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Internal(detail) => {
                tracing::error!(%detail, "internal error");
                "Internal server error.".to_string()
            }
            other => other.to_string(),
        };
        json_error(self.status(), &message)
    }
}

/// `{"success": false, "message": ...}` with the given status.
pub fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

/// `200 {"success": true, "data": ...}`.
pub fn ok_data(data: Value) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": data })),
    )
        .into_response()
}

/// `200 {"success": true, "message": ...}`.
pub fn ok_message(message: &str) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": message })),
    )
        .into_response()
}

/// `{"success": true, "message": ..., "data": ...}` with the given status.
pub fn json_ok(status: StatusCode, message: &str, data: Value) -> Response {
    (
        status,
        Json(json!({ "success": true, "message": message, "data": data })),
    )
        .into_response()
}
