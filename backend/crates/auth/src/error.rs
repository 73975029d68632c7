//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::duration::DurationParseError;
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required request field is empty
    #[error("Email, password and full name are required")]
    MissingFields,

    #[error("Invalid email address")]
    InvalidEmail,

    /// Body is not the expected JSON shape
    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),

    /// Profile lookup with an id no store ever assigned
    #[error("Invalid user id")]
    InvalidUserId,

    #[error("Email already registered")]
    EmailTaken,

    /// Unknown email, malformed email or wrong password. Never says which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing refresh token")]
    MissingRefreshToken,

    #[error("Missing bearer token")]
    MissingBearerToken,

    /// Bad signature, disallowed algorithm, malformed structure or expired
    #[error("Invalid token")]
    InvalidToken,

    /// `sub` claim is neither an integer nor a numeric string
    #[error("Invalid subject")]
    InvalidSubject,

    #[error("Wrong token type")]
    WrongTokenType,

    #[error("User not found")]
    UserNotFound,

    /// Credential store did not answer within the deadline
    #[error("Credential store timed out")]
    StoreTimeout,

    #[error("Password hashing error: {0}")]
    Hashing(#[from] PasswordHashError),

    #[error("Token signing error: {0}")]
    TokenSigning(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingFields
            | AuthError::InvalidEmail
            | AuthError::InvalidPayload(_)
            | AuthError::InvalidUserId => ErrorKind::BadRequest,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::MissingRefreshToken
            | AuthError::MissingBearerToken
            | AuthError::InvalidToken
            | AuthError::InvalidSubject
            | AuthError::WrongTokenType => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::StoreTimeout => ErrorKind::ServiceUnavailable,
            AuthError::Hashing(_)
            | AuthError::TokenSigning(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Server-side failures get a generic message so no
    /// query text or library detail reaches the client.
    pub fn to_app_error(&self) -> AppError {
        match self.kind() {
            ErrorKind::InternalServerError => AppError::internal("Internal server error"),
            ErrorKind::ServiceUnavailable => AppError::service_unavailable(self.to_string())
                .with_action("Please retry in a moment"),
            kind => AppError::new(kind, self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Hashing(e) => {
                tracing::error!(error = %e, "Password hashing failed");
            }
            AuthError::TokenSigning(msg) => {
                tracing::error!(message = %msg, "Token signing failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::StoreTimeout => {
                tracing::error!("Credential store deadline exceeded");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken | AuthError::InvalidSubject | AuthError::WrongTokenType => {
                tracing::warn!(error = %self, "Rejected token");
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
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

/// Startup configuration errors. These abort the process before the router
/// is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("token secret must be at least {min} bytes (got {actual})")]
    SecretTooShort { min: usize, actual: usize },

    #[error("{name}: {source}")]
    InvalidDuration {
        name: &'static str,
        source: DurationParseError,
    },

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("{0} must be at least one second")]
    SubSecondTtl(&'static str),

    #[error("invalid value {value:?} for {name}")]
    InvalidValue { name: &'static str, value: String },

    #[error("invalid password hash cost: {0}")]
    HashCost(#[from] PasswordHashError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::MissingFields.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::InvalidEmail.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::InvalidUserId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::WrongTokenType.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::StoreTimeout.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AuthError::TokenSigning("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = AuthError::Database(sqlx::Error::Protocol("relation users".into()));
        let app = err.to_app_error();
        assert_eq!(app.status_code(), 500);
        assert!(!app.message().contains("users"));
    }

    #[test]
    fn test_client_errors_keep_message() {
        let app = AuthError::MissingRefreshToken.to_app_error();
        assert_eq!(app.status_code(), 401);
        assert_eq!(app.message(), "Missing refresh token");
    }
}
