//! Category Handlers

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::taxonomy::models::{Category, NewTaxon, TaxonUpdate};

use crate::{
    extensions::*,
    state::State,
    taxonomy::brands::{TaxonPatchRequest, TaxonRequest},
    taxonomy::errors::into_status_error,
};

/// Category Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            uuid: category.uuid.into_uuid(),
            name: category.name,
            slug: category.slug,
        }
    }
}

/// List Categories Handler
#[endpoint(tags("categories"), summary = "List Categories")]
pub(crate) async fn index(depot: &mut Depot) -> Result<Json<Vec<CategoryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .taxonomy
        .list_categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// Create Category Handler
#[endpoint(tags("categories"), summary = "Create Category", security(("bearer_auth" = [])))]
pub(crate) async fn create(
    json: JsonBody<TaxonRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = json.into_inner();

    let category = state
        .app
        .taxonomy
        .create_category(NewTaxon {
            name: request.name,
            slug: request.slug,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(category.into()))
}

/// Update Category Handler
#[endpoint(tags("categories"), summary = "Update Category", security(("bearer_auth" = [])))]
pub(crate) async fn update(
    category: PathParam<Uuid>,
    json: JsonBody<TaxonPatchRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = json.into_inner();

    let category = state
        .app
        .taxonomy
        .update_category(
            category.into_inner().into(),
            TaxonUpdate {
                name: request.name,
                slug: request.slug,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}

/// Delete Category Handler
#[endpoint(tags("categories"), summary = "Delete Category", security(("bearer_auth" = [])))]
pub(crate) async fn delete(
    category: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<serde_json::Value>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .taxonomy
        .delete_category(category.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(serde_json::json!({ "message": "Category deleted" })))
}
