//! Brand Handlers

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::taxonomy::models::{Brand, NewTaxon, TaxonUpdate};

use crate::{extensions::*, state::State, taxonomy::errors::into_status_error};

/// Brand Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BrandResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<Brand> for BrandResponse {
    fn from(brand: Brand) -> Self {
        Self {
            uuid: brand.uuid.into_uuid(),
            name: brand.name,
            slug: brand.slug,
        }
    }
}

/// Create/Update payload shared by brands and categories.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TaxonRequest {
    pub name: String,
    pub slug: Option<String>,
}

/// Patch payload; absent fields stay untouched.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TaxonPatchRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

/// List Brands Handler
#[endpoint(tags("brands"), summary = "List Brands")]
pub(crate) async fn index(depot: &mut Depot) -> Result<Json<Vec<BrandResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let brands = state
        .app
        .taxonomy
        .list_brands()
        .await
        .map_err(into_status_error)?;

    Ok(Json(brands.into_iter().map(Into::into).collect()))
}

/// Create Brand Handler
#[endpoint(tags("brands"), summary = "Create Brand", security(("bearer_auth" = [])))]
pub(crate) async fn create(
    json: JsonBody<TaxonRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BrandResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = json.into_inner();

    let brand = state
        .app
        .taxonomy
        .create_brand(NewTaxon {
            name: request.name,
            slug: request.slug,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(brand.into()))
}

/// Update Brand Handler
#[endpoint(tags("brands"), summary = "Update Brand", security(("bearer_auth" = [])))]
pub(crate) async fn update(
    brand: PathParam<Uuid>,
    json: JsonBody<TaxonPatchRequest>,
    depot: &mut Depot,
) -> Result<Json<BrandResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request = json.into_inner();

    let brand = state
        .app
        .taxonomy
        .update_brand(
            brand.into_inner().into(),
            TaxonUpdate {
                name: request.name,
                slug: request.slug,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(brand.into()))
}

/// Delete Brand Handler
#[endpoint(tags("brands"), summary = "Delete Brand", security(("bearer_auth" = [])))]
pub(crate) async fn delete(
    brand: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<serde_json::Value>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .taxonomy
        .delete_brand(brand.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(serde_json::json!({ "message": "Brand deleted" })))
}
