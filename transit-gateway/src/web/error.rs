//! Mapping of request failures to HTTP responses.

use axum::{
    Json,
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::provider::{ProviderError, ProviderKind};
use crate::schema::ValidationError;

use super::dto::ErrorResponse;

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Request parameters failed schema validation
    Validation(ValidationError),

    /// A provider call failed
    Provider {
        kind: ProviderKind,
        error: ProviderError,
    },

    /// No route matched
    NotFound,
}

impl AppError {
    pub fn bus(error: ProviderError) -> Self {
        AppError::Provider {
            kind: ProviderKind::Bus,
            error,
        }
    }

    pub fn train(error: ProviderError) -> Self {
        AppError::Provider {
            kind: ProviderKind::Train,
            error,
        }
    }

    /// Status code this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Provider { error, .. } => match error {
                ProviderError::Upstream { .. } => StatusCode::BAD_GATEWAY,
                ProviderError::Transport(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
                ProviderError::Transport(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

/// Path segments axum could not decode (e.g. invalid UTF-8).
impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::Validation(ValidationError::single("path", e.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::Validation(e) => {
                warn!(%e, "rejected request");
                ErrorResponse {
                    error: "invalid request".to_string(),
                    fields: e.fields,
                }
            }
            AppError::NotFound => ErrorResponse::new("not found"),
            AppError::Provider {
                kind,
                error: ProviderError::Upstream { message },
            } => {
                warn!(provider = %kind, %message, "provider reported an error");
                ErrorResponse::new(message)
            }
            AppError::Provider {
                kind,
                error: ProviderError::Transport(e),
            } => {
                error!(provider = %kind, error = %e, "provider call failed");
                ErrorResponse::new(format!("{kind} provider unavailable"))
            }
        };

        (status, Json(body)).into_response()
    }
}
