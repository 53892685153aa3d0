//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] curbside_core::EmailError),

    /// Wrong email or password. Deliberately uniform so callers can't
    /// distinguish an unknown account from a bad password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Password hashing or verification failed.
    #[error("password hashing error: {0}")]
    Hashing(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
