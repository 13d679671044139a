//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::errors::into_status_error, carts::get::CartResponse, extensions::*, state::State,
};

/// Clear Cart Handler
///
/// Empties the caller's cart. Idempotent: clearing an empty cart succeeds.
#[endpoint(tags("cart"), summary = "Clear Cart", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let cart = state
        .app
        .carts
        .clear(actor.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
