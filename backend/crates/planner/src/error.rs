//! Planner Error Types
//!
//! This module provides planner-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Four classes stay distinguishable to callers: client input (400/405),
//! authentication (401), task store failure (502/504) and internal (500).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use telegram::InitDataError;
use thiserror::Error;

/// Planner-specific result type alias
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Required request field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestField {
    TelegramId,
    Action,
    Date,
}

impl RequestField {
    pub const fn name(&self) -> &'static str {
        match self {
            RequestField::TelegramId => "telegramId",
            RequestField::Action => "action",
            RequestField::Date => "date",
        }
    }

    const fn hint(&self) -> &'static str {
        match self {
            RequestField::Date => " (YYYY-MM-DD)",
            _ => "",
        }
    }
}

/// Why a request failed authentication
///
/// Logged only. Clients always see the same message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("init data rejected: {0}")]
    InitData(#[from] InitDataError),

    #[error("claimed telegramId does not match the signed user")]
    IdentityMismatch,

    #[error("init data is older than the freshness window")]
    Stale,
}

/// Planner-specific error variants
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Any method other than POST on the tasks route
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Body is not a JSON object
    #[error("Invalid JSON body")]
    InvalidJson,

    /// Required field missing, blank or not a string
    #[error("{} is required{}", .0.name(), .0.hint())]
    MissingField(RequestField),

    /// Action other than `get` / `save`
    #[error("Unknown action. Use 'get' or 'save'.")]
    UnknownAction(String),

    /// `save` payload is not a JSON array
    #[error("tasks must be an array")]
    TasksNotArray,

    /// Init data failed verification or does not vouch for the claimed user
    #[error("Invalid Telegram initData")]
    InvalidCredentials(AuthFailure),

    /// Task store rejected the call or could not be reached
    #[error("{message}")]
    Storage {
        message: String,
        details: Option<String>,
    },

    /// Task store did not answer in time
    #[error("Task store timed out")]
    StorageTimeout,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlannerError {
    pub fn storage(message: impl Into<String>, details: Option<String>) -> Self {
        PlannerError::Storage {
            message: message.into(),
            details,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PlannerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            PlannerError::InvalidJson
            | PlannerError::MissingField(_)
            | PlannerError::UnknownAction(_)
            | PlannerError::TasksNotArray => StatusCode::BAD_REQUEST,
            PlannerError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            PlannerError::Storage { .. } => StatusCode::BAD_GATEWAY,
            PlannerError::StorageTimeout => StatusCode::GATEWAY_TIMEOUT,
            PlannerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlannerError::MethodNotAllowed => ErrorKind::MethodNotAllowed,
            PlannerError::InvalidJson
            | PlannerError::MissingField(_)
            | PlannerError::UnknownAction(_)
            | PlannerError::TasksNotArray => ErrorKind::BadRequest,
            PlannerError::InvalidCredentials(_) => ErrorKind::Unauthorized,
            PlannerError::Storage { .. } => ErrorKind::BadGateway,
            PlannerError::StorageTimeout => ErrorKind::GatewayTimeout,
            PlannerError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            PlannerError::Storage {
                details: Some(details),
                ..
            } => err.with_details(details.clone()),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PlannerError::Storage { message, details } => {
                tracing::error!(
                    error = %message,
                    details = details.as_deref().unwrap_or(""),
                    "Task store error"
                );
            }
            PlannerError::StorageTimeout => {
                tracing::error!("Task store timed out");
            }
            PlannerError::Internal(msg) => {
                tracing::error!(message = %msg, "Planner internal error");
            }
            PlannerError::InvalidCredentials(reason) => {
                tracing::warn!(reason = %reason, "Rejected Telegram init data");
            }
            _ => {
                tracing::debug!(error = %self, "Planner request rejected");
            }
        }
    }
}

impl IntoResponse for PlannerError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AuthFailure> for PlannerError {
    fn from(reason: AuthFailure) -> Self {
        PlannerError::InvalidCredentials(reason)
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return PlannerError::StorageTimeout;
        }

        let message = if err.is_connect() {
            "Task store unreachable"
        } else if err.is_decode() {
            "Invalid response from task store"
        } else {
            "Task store request failed"
        };

        // Request URLs carry user ids in the query; keep them out of responses.
        PlannerError::storage(message, Some(err.without_url().to_string()))
    }
}
