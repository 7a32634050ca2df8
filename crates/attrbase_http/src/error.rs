//! HTTP error mapping.
//!
//! # Responsibility
//! - Map request and storage failures to status codes and `{ "error": ... }` bodies.
//!
//! # Invariants
//! - Storage detail is logged, never returned to the client.

use attrbase_core::RepoError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde_json::json;
use thiserror::Error;

/// Request-level failures. The display text is the public `error` message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Error: invalid body format")]
    InvalidRequestShape,

    #[error("Database connection failed")]
    PersistenceUnavailable { detail: String },
}

impl ApiError {
    pub fn persistence(detail: impl Into<String>) -> Self {
        Self::PersistenceUnavailable {
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequestShape => StatusCode::BAD_REQUEST,
            Self::PersistenceUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::persistence(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::PersistenceUnavailable { detail } = &self {
            error!(
                "event=http_error module=http status=error error_code=persistence_unavailable error={detail}"
            );
        }

        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
