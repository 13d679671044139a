//! Stats service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsServiceError {
    #[error("storage error")]
    Sql(#[from] Error),
}
