//! Taxonomy service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaxonomyServiceError {
    #[error("name or slug already exists")]
    AlreadyExists,

    #[error("brand or category not found")]
    NotFound,

    /// Products still reference the record being deleted.
    #[error("still referenced by products")]
    StillReferenced,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for TaxonomyServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::StillReferenced,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            _ => Self::Sql(error),
        }
    }
}
