//! Auth Error Types
//!
//! Two layers of errors:
//! - [`StorageError`] is what the capability traits return. Its not-found
//!   variants never leave the application layer.
//! - [`AuthError`] is the closed set callers see. It integrates with the
//!   unified `kernel::error::AppError` system for HTTP responses.

use std::error::Error as StdError;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Store-layer result type alias
pub type StorageResult<T> = Result<T, StorageError>;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

// ============================================================================
// Storage
// ============================================================================

/// Errors produced by user/app stores
#[derive(Debug, Error)]
pub enum StorageError {
    /// Email uniqueness constraint rejected the insert
    #[error("user already exists")]
    UserExists,

    #[error("user not found")]
    UserNotFound,

    #[error("app not found")]
    AppNotFound,

    /// Cancellation handle fired before the call completed
    #[error("storage operation cancelled")]
    Cancelled,

    /// A stored row violates a domain invariant
    #[error("corrupt record: {0}")]
    Corrupt(String),

    /// Any other engine failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

// ============================================================================
// Auth
// ============================================================================

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Registration collided with an existing email
    #[error("User already exists")]
    UserExists,

    /// `app_id` does not resolve. Also returned by `IsAdmin` for an unknown
    /// user id, which older clients depend on.
    #[error("Invalid app ID")]
    InvalidAppId,

    /// Request rejected by adapter-level validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Caller cancelled or the request deadline passed
    #[error("Request cancelled")]
    Cancelled,

    /// Any unclassified failure; `source` is kept for logs only
    #[error("Internal error: {context}")]
    Internal {
        context: &'static str,
        #[source]
        source: BoxError,
    },
}

impl AuthError {
    pub fn internal(context: &'static str, source: impl Into<BoxError>) -> Self {
        AuthError::Internal {
            context,
            source: source.into(),
        }
    }

    /// Translate a store error that has no operation-specific meaning
    ///
    /// Callers match the not-found/exists variants they care about first;
    /// everything else lands here.
    pub fn from_storage(context: &'static str, err: StorageError) -> Self {
        match err {
            StorageError::Cancelled => AuthError::Cancelled,
            other => AuthError::internal(context, other),
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::UserExists => ErrorKind::Conflict,
            AuthError::InvalidAppId | AuthError::InvalidRequest(_) => ErrorKind::BadRequest,
            AuthError::Cancelled => ErrorKind::ClientClosedRequest,
            AuthError::Internal { .. } => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError
    ///
    /// Internal failures get an opaque message; the root cause travels as
    /// the `source` and is never rendered.
    pub fn into_app_error(self) -> AppError {
        let kind = self.kind();
        match self {
            AuthError::Internal { source, .. } => {
                AppError::new(kind, "Internal error").with_boxed_source(source)
            }
            AuthError::InvalidCredentials => AppError::new(kind, "Invalid email or password"),
            other => AppError::new(kind, other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Internal { context, source } => {
                tracing::error!(context = %context, error = %source, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Cancelled => {
                tracing::info!("Auth request cancelled");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::InvalidRequest(err.message().to_string())
    }
}

/// Unparsable bodies get the same problem document as missing fields
impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::InvalidRequest(rejection.body_text())
    }
}
