//! Promotion Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::promotions::PromotionsServiceError;

pub(crate) fn into_status_error(error: PromotionsServiceError) -> StatusError {
    match error {
        PromotionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Promotion code already exists")
        }
        PromotionsServiceError::InvalidDiscount => {
            StatusError::bad_request().brief("Percentage discount must be between 0 and 100")
        }
        PromotionsServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Code is required")
        }
        PromotionsServiceError::Inactive => {
            StatusError::bad_request().brief("Promotion is not active")
        }
        PromotionsServiceError::NotStarted => {
            StatusError::bad_request().brief("Promotion is not valid yet")
        }
        PromotionsServiceError::Expired => StatusError::bad_request().brief("Promotion has expired"),
        PromotionsServiceError::Exhausted => {
            StatusError::bad_request().brief("Promotion has no uses left")
        }
        PromotionsServiceError::NotFound => StatusError::not_found().brief("Promotion not found"),
        PromotionsServiceError::Sql(source) => {
            error!("promotions storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
