//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Storage and crypto failures are classified here once; the wire only ever
//! sees the [`ErrorKind`] and a fixed public message.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message returned for every unclassified failure
pub const INTERNAL_MESSAGE: &str = "internal error";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password (deliberately indistinguishable)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// App id is not usable for this request
    #[error("Invalid app id")]
    InvalidApp,

    /// Email is already registered
    #[error("User already exists")]
    UserExists,

    /// No user with the given email or id
    #[error("User not found")]
    UserNotFound,

    /// No app with the given id
    #[error("App not found")]
    AppNotFound,

    /// Missing or malformed required field
    #[error("Validation failed: {0}")]
    Validation(&'static str),

    /// Request body could not be decoded
    #[error("Malformed request: {0}")]
    Rejection(#[from] JsonRejection),

    /// Password hashing or verification failure
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// Token signing failure
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Database error
    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::InvalidApp
            | AuthError::AppNotFound
            | AuthError::Validation(_)
            | AuthError::Rejection(_) => ErrorKind::InvalidArgument,
            AuthError::UserExists => ErrorKind::AlreadyExists,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::PasswordHash(_)
            | AuthError::Token(_)
            | AuthError::Storage(_)
            | AuthError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Message safe to put on the wire
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid email or password",
            AuthError::InvalidApp | AuthError::AppNotFound => "invalid app id",
            AuthError::UserExists => "user already exists",
            AuthError::UserNotFound => "user not found",
            AuthError::Validation(message) => *message,
            AuthError::Rejection(_) => "malformed request body",
            AuthError::PasswordHash(_)
            | AuthError::Token(_)
            | AuthError::Storage(_)
            | AuthError::Internal(_) => INTERNAL_MESSAGE,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Storage(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Token signing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
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
