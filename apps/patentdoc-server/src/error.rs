//! Error types for the conversion server
//!
//! A failed conversion surfaces exactly one message; nothing partial is
//! returned alongside it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use doc_assembly::{EditorError, PlanError};
use patent_records::{RecordError, SourceError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Names the missing resource, e.g. `spreadsheet <id>`.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Raw message from the upstream API.
    #[error("{0}")]
    Upstream(String),

    #[error("Malformed source data: {0}")]
    MalformedSource(#[from] RecordError),

    #[error("Planning error: {0}")]
    Plan(#[from] PlanError),
}

impl ConvertError {
    /// The single message shown to the caller for this failure.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::InvalidRequest(_) => "INVALID_REQUEST",
            ConvertError::NotFound(_) => "NOT_FOUND",
            ConvertError::Upstream(_) => "UPSTREAM_ERROR",
            ConvertError::MalformedSource(_) => "MALFORMED_SOURCE",
            ConvertError::Plan(_) => "PLAN_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ConvertError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ConvertError::NotFound(_) => StatusCode::NOT_FOUND,
            ConvertError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ConvertError::MalformedSource(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ConvertError::Plan(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SourceError> for ConvertError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NotFound(id) => ConvertError::NotFound(format!("spreadsheet {}", id)),
            SourceError::Upstream(message) => ConvertError::Upstream(message),
        }
    }
}

impl From<EditorError> for ConvertError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::NotFound(id) => ConvertError::NotFound(format!("document {}", id)),
            EditorError::Upstream(message) => ConvertError::Upstream(message),
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Conversion failed: {}", self);
        }

        let body = ErrorResponse {
            success: false,
            error: self.user_message(),
            code: self.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}
