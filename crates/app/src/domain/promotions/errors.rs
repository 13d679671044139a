//! Promotions service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromotionsServiceError {
    #[error("promotion code already exists")]
    AlreadyExists,

    #[error("promotion not found")]
    NotFound,

    /// Percentage discounts live in 0–100.
    #[error("percentage discount must be between 0 and 100")]
    InvalidDiscount,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("promotion is not active")]
    Inactive,

    #[error("promotion is not valid yet")]
    NotStarted,

    #[error("promotion has expired")]
    Expired,

    #[error("promotion has no uses left")]
    Exhausted,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PromotionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::CheckViolation) => Self::InvalidDiscount,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            _ => Self::Sql(error),
        }
    }
}
