//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::orders::models::OrderStatus;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// Orders must contain at least one line.
    #[error("order has no items")]
    EmptyOrder,

    #[error("order not found")]
    NotFound,

    /// Caller is neither the owner nor an admin.
    #[error("not allowed to access this order")]
    Forbidden,

    /// Only pending orders may be deleted.
    #[error("only pending orders can be deleted")]
    NotPending,

    /// The requested status does not follow a legal lifecycle edge.
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}
