//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::models::{Order, OrderLine};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub user: Uuid,
    pub items: Vec<OrderItemResponse>,
    pub total: u64,
    pub payment_method: String,
    pub shipping_address: String,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: String,
}

/// One purchased line snapshot.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub product: Uuid,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    pub selected_size: Option<String>,
    pub image_url: Option<String>,
}

impl From<OrderLine> for OrderItemResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            product: line.product.into_uuid(),
            name: line.name,
            price: line.unit_price,
            quantity: line.quantity,
            selected_size: line.selected_size,
            image_url: line.image_url,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            user: order.user.into_uuid(),
            items: order.lines.into_iter().map(Into::into).collect(),
            total: order.total,
            payment_method: order.payment_method,
            shipping_address: order.shipping_address,
            notes: order.notes,
            status: order.status.as_str().to_string(),
            created_at: order.created_at.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Owner or admin only.
#[endpoint(tags("orders"), summary = "Get Order", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let order = state
        .app
        .orders
        .get_order(actor, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
