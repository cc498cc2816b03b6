//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure a client can observe is one of its variants, and every variant maps to
//! exactly one HTTP status code.
//!
//! `AppError` implements `actix_web::error::ResponseError`, rendering the shared failure
//! envelope (`{"status": "error", "message": ...}`). Internal failures are logged with
//! their detail and presented to the client with a generic message.
//! `From` implementations for `sqlx::Error`, `bcrypt::BcryptError`,
//! `jsonwebtoken::errors::Error` and `BlockingError` allow propagation with `?`.

use actix_web::{error::BlockingError, error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;

use crate::response::ApiResponse;

/// Message sent to clients for any 500-class failure.
const INTERNAL_MESSAGE: &str = "Internal server error.";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Malformed input: failed validation, unparsable body or query, bad id (HTTP 400).
    ValidationError(String),
    /// Signup attempted with an email that already belongs to an account (HTTP 409).
    DuplicateEmail,
    /// The user or todo does not exist, or belongs to someone else (HTTP 404).
    NotFound(String),
    /// Login with a known email but the wrong password (HTTP 401).
    InvalidCredentials,
    /// Missing, invalid or expired token, or a token whose user is gone (HTTP 401).
    Unauthorized(String),
    /// Represents an unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// Represents an error originating from database operations (HTTP 500).
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::DuplicateEmail => write!(f, "Conflict: Email already exists."),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InvalidCredentials => write!(f, "Unauthorized: Invalid Credentials."),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl AppError {
    /// The message placed in the response envelope.
    pub fn client_message(&self) -> &str {
        match self {
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::Unauthorized(msg) => msg,
            AppError::DuplicateEmail => "Email already exists.",
            AppError::InvalidCredentials => "Invalid Credentials.",
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => INTERNAL_MESSAGE,
        }
    }
}

/// Converts `AppError` variants into enveloped `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::InternalServerError(detail) | AppError::DatabaseError(detail) = self {
            log::error!("{}", detail);
        }
        HttpResponse::build(self.status_code()).json(ApiResponse::error(self.client_message()))
    }
}

/// Name of the `users.email` uniqueness constraint (see `migrations/`).
pub const USERS_EMAIL_CONSTRAINT: &str = "users_email_key";

/// Converts `sqlx::Error` into `AppError`.
///
/// Only a violation of `USERS_EMAIL_CONSTRAINT` becomes `AppError::DuplicateEmail`;
/// any other failure, other unique violations included, is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match &error {
            sqlx::Error::Database(db_error)
                if db_error.is_unique_violation()
                    && db_error.constraint() == Some(USERS_EMAIL_CONSTRAINT) =>
            {
                AppError::DuplicateEmail
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("Password hashing failed: {}", error))
    }
}

/// Only signing goes through this conversion; verification failures are classified by
/// `TokenService::verify` instead.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::InternalServerError(format!("Failed to sign token: {}", error))
    }
}

impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::InternalServerError(format!("Blocking task failed: {}", error))
    }
}
