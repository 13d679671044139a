//! Admin Inventory Handlers

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam, QueryParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::{
    inventory::{
        InventoryServiceError,
        models::{InventoryAdjustment, StockLevel},
    },
    products::models::ProductKey,
};

use crate::{extensions::*, state::State};

/// Default low-stock threshold when none is given.
const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// A product's stock level.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StockLevelResponse {
    pub product: Uuid,
    pub name: String,
    pub sku: Option<String>,
    pub stock: u32,
}

impl From<StockLevel> for StockLevelResponse {
    fn from(level: StockLevel) -> Self {
        Self {
            product: level.product.into_uuid(),
            name: level.name,
            sku: level.sku,
            stock: level.stock,
        }
    }
}

/// One stock audit entry.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdjustmentResponse {
    pub uuid: Uuid,
    pub delta: i32,
    pub resulting_stock: u32,
    pub reason: Option<String>,
    pub actor: Uuid,
    pub created_at: String,
}

impl From<InventoryAdjustment> for AdjustmentResponse {
    fn from(adjustment: InventoryAdjustment) -> Self {
        Self {
            uuid: adjustment.uuid.into_uuid(),
            delta: adjustment.delta,
            resulting_stock: adjustment.resulting_stock,
            reason: adjustment.reason,
            actor: adjustment.actor.into_uuid(),
            created_at: adjustment.created_at.to_string(),
        }
    }
}

/// Stock write request: either an absolute level or a signed delta.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StockRequest {
    pub stock: Option<u32>,
    pub delta: Option<i32>,
    pub reason: Option<String>,
}

fn map_error(error: InventoryServiceError) -> StatusError {
    match error {
        InventoryServiceError::ProductNotFound => {
            StatusError::not_found().brief("Product not found")
        }
        InventoryServiceError::InsufficientStock => {
            StatusError::bad_request().brief("Not enough stock for this adjustment")
        }
        InventoryServiceError::Sql(source) => {
            tracing::error!("inventory storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Set Stock Handler
///
/// `stock` replaces the level outright; `delta` adjusts it. Exactly one of
/// the two must be present.
#[endpoint(tags("admin"), summary = "Set Product Stock", security(("bearer_auth" = [])))]
pub(crate) async fn set_stock(
    key: PathParam<String>,
    json: JsonBody<StockRequest>,
    depot: &mut Depot,
) -> Result<Json<StockLevelResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let key = ProductKey::parse(&key.into_inner());
    let request = json.into_inner();

    let level = match (request.stock, request.delta) {
        (Some(stock), None) => state
            .app
            .inventory
            .set_stock(actor, key, stock, request.reason)
            .await
            .map_err(map_error)?,
        (None, Some(delta)) => state
            .app
            .inventory
            .adjust_stock(actor, key, delta, request.reason)
            .await
            .map_err(map_error)?,
        _ => {
            return Err(StatusError::bad_request().brief("Provide exactly one of stock or delta"));
        }
    };

    Ok(Json(level.into()))
}

/// Low Stock Handler
#[endpoint(tags("admin"), summary = "Low Stock Report", security(("bearer_auth" = [])))]
pub(crate) async fn low_stock(
    threshold: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<StockLevelResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let levels = state
        .app
        .inventory
        .low_stock(threshold.into_inner().unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD))
        .await
        .map_err(map_error)?;

    Ok(Json(levels.into_iter().map(Into::into).collect()))
}

/// Stock History Handler
#[endpoint(tags("admin"), summary = "Stock History", security(("bearer_auth" = [])))]
pub(crate) async fn history(
    key: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Vec<AdjustmentResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let adjustments = state
        .app
        .inventory
        .adjustments(ProductKey::parse(&key.into_inner()))
        .await
        .map_err(map_error)?;

    Ok(Json(adjustments.into_iter().map(Into::into).collect()))
}
