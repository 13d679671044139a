//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

/// Map order service failures onto HTTP statuses. Illegal deletions and
/// transitions surface as 400, matching the API contract.
pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::EmptyOrder => {
            StatusError::bad_request().brief("Order must contain at least one item")
        }
        OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid order payload"),
        OrdersServiceError::NotPending => {
            StatusError::bad_request().brief("Only pending orders can be deleted")
        }
        OrdersServiceError::InvalidTransition { from, to } => {
            StatusError::bad_request().brief(format!("Cannot move order from {from} to {to}"))
        }
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("Not allowed to access this order")
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Sql(source) => {
            error!("orders storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
