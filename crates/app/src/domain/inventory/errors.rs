//! Inventory service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryServiceError {
    #[error("product not found")]
    ProductNotFound,

    /// An adjustment may not drive stock below zero.
    #[error("not enough stock for this adjustment")]
    InsufficientStock,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for InventoryServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::ProductNotFound;
        }

        Self::Sql(error)
    }
}
