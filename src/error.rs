use crate::models::{ErrorCode, FailureResponse};
use crate::sheets::UpstreamError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("{0}")]
    Auth(String),

    #[error("{message}")]
    Upstream { message: String, code: ErrorCode },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Error for an upstream failure that has already been translated into a
    /// user-facing message.
    pub fn upstream(message: impl Into<String>, source: &UpstreamError) -> Self {
        AppError::Upstream {
            message: message.into(),
            code: ErrorCode::from(source.code),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Body(rejection) => match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
                _ => StatusCode::BAD_REQUEST,
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) | AppError::Body(_) => ErrorCode::InvalidRequest,
            AppError::Upstream { code, .. } => code.clone(),
            _ => ErrorCode::Unknown,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "Request failed");
        }
        let body = FailureResponse {
            success: false,
            error: self.to_string(),
            code: self.code(),
        };
        (status, Json(body)).into_response()
    }
}
