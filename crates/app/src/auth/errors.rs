//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::{password::PasswordError, token::TokenError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// A required registration field was absent or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Username or email already registered.
    #[error("username or email already in use")]
    IdentityTaken,

    /// Unknown identity or wrong password; deliberately one variant so the
    /// response cannot distinguish the two.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("session token rejected")]
    Token(#[from] TokenError),

    #[error("password processing failed")]
    Password(#[from] PasswordError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::IdentityTaken,
            _ => Self::Sql(error),
        }
    }
}
