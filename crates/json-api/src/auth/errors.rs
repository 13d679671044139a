//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::auth::AuthServiceError;

/// Map auth service failures onto HTTP statuses. Registration duplicates
/// and bad credentials both surface as 400, matching the API contract;
/// token failures are the middleware's 401 domain.
pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::MissingField(field) => {
            StatusError::bad_request().brief(format!("Missing required field: {field}"))
        }
        AuthServiceError::IdentityTaken => {
            StatusError::bad_request().brief("Username or email already in use")
        }
        AuthServiceError::InvalidCredentials => {
            StatusError::bad_request().brief("Invalid credentials")
        }
        AuthServiceError::Token(source) => {
            error!("token rejected outside middleware: {source}");

            StatusError::unauthorized().brief("Invalid or expired token")
        }
        AuthServiceError::Password(source) => {
            error!("password processing failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
