use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::dto::MessageResponse;
use crate::store::StoreError;

/// Every failure a handler can produce. The `Display` text is what the
/// client sees, so it must never carry internals.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Parse(String),
    #[error("{0}")]
    Auth(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{message}")]
    Persistence {
        message: &'static str,
        #[source]
        source: StoreError,
    },
    #[error("{0}")]
    Hash(&'static str),
    #[error("{0}")]
    Signing(&'static str),
}

impl AppError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Wraps a store failure with the message the client should see.
    pub fn persistence(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Persistence { message, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Parse(_) => StatusCode::BAD_REQUEST,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence { .. } | Self::Hash(_) | Self::Signing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected request body");
        Self::parse("Could not parse request data.")
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected path parameter");
        Self::parse("Could not parse event id.")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let Self::Persistence { source, .. } = &self {
            error!(error = %source, %status, "store operation failed");
        }
        let body = MessageResponse {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
