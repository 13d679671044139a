//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::{Cart, CartLine};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    pub uuid: Uuid,
    pub items: Vec<CartItemResponse>,
    pub subtotal: u64,
    pub updated_at: String,
}

/// One cart line as seen by clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub product: Uuid,
    pub quantity: u32,
    /// Unit price snapshot from the most recent add.
    pub price: u64,
    pub selected_size: Option<String>,
    pub image_url: Option<String>,
}

impl From<CartLine> for CartItemResponse {
    fn from(line: CartLine) -> Self {
        Self {
            uuid: line.uuid.into_uuid(),
            product: line.product.into_uuid(),
            quantity: line.quantity,
            price: line.unit_price,
            selected_size: line.selected_size,
            image_url: line.image_url,
        }
    }
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        let subtotal = cart.subtotal();

        Self {
            uuid: cart.uuid.into_uuid(),
            subtotal,
            updated_at: cart.updated_at.to_string(),
            items: cart.lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the caller's cart, creating it on first access.
#[endpoint(tags("cart"), summary = "Get Cart", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let cart = state
        .app
        .carts
        .get_or_create_cart(actor.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
