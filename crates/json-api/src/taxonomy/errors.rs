//! Taxonomy Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::taxonomy::TaxonomyServiceError;

pub(crate) fn into_status_error(error: TaxonomyServiceError) -> StatusError {
    match error {
        TaxonomyServiceError::AlreadyExists => {
            StatusError::conflict().brief("Name or slug already exists")
        }
        TaxonomyServiceError::StillReferenced => {
            StatusError::bad_request().brief("Still referenced by products")
        }
        TaxonomyServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Name is required")
        }
        TaxonomyServiceError::NotFound => StatusError::not_found().brief("Not found"),
        TaxonomyServiceError::Sql(source) => {
            error!("taxonomy storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
