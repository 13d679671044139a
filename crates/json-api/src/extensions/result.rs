//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Map errors to logged HTTP failures.
pub(crate) trait ResultExt<T> {
    /// Any error becomes a logged internal server error.
    fn or_500(self, context: &str) -> Result<T, StatusError>;

    /// Any error becomes a bad request carrying the given brief.
    fn or_400(self, brief: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }

    fn or_400(self, brief: &str) -> Result<T, StatusError> {
        self.map_err(|_error| StatusError::bad_request().brief(brief.to_string()))
    }
}
