//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::errors::into_status_error, carts::get::CartResponse, extensions::*, state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    pub quantity: u32,
}

/// Update Cart Item Handler
///
/// Targets a line by its own UUID, not by product.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let cart = state
        .app
        .carts
        .update_item_quantity(actor.user, item.into_inner().into(), json.quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::carts::{
        CartsServiceError, MockCartsService, models::CartLineUuid,
    };

    use crate::test_helpers::{TEST_USER_UUID, carts_service, make_cart};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/items/{item}").put(handler))
    }

    #[tokio::test]
    async fn test_update_quantity_targets_the_line() -> TestResult {
        let line = CartLineUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_update_item_quantity()
            .once()
            .withf(move |user, l, quantity| {
                *user == TEST_USER_UUID && *l == line && *quantity == 5
            })
            .return_once(|user, _, _| Ok(make_cart(user)));

        let res = TestClient::put(format!("http://example.com/cart/items/{line}"))
            .json(&json!({ "quantity": 5 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_line_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item_quantity()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        let res = TestClient::put(format!(
            "http://example.com/cart/items/{}",
            CartLineUuid::new()
        ))
        .json(&json!({ "quantity": 2 }))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
