//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::errors::into_status_error, carts::get::CartResponse, extensions::*, state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddCartItemRequest {
    pub product: Uuid,
    pub quantity: u32,
    pub selected_size: Option<String>,
}

/// Add Cart Item Handler
///
/// Repeat adds of the same (product, size) merge into one line; a different
/// size forks a new line.
#[endpoint(
    tags("cart"),
    summary = "Add Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let request = json.into_inner();

    let cart = state
        .app
        .carts
        .add_item(
            actor.user,
            request.product.into(),
            request.quantity,
            request.selected_size,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        products::models::ProductUuid,
    };

    use crate::test_helpers::{TEST_USER_UUID, carts_service, make_cart};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/items").post(handler))
    }

    #[tokio::test]
    async fn test_add_item_passes_product_quantity_and_size() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |user, p, quantity, size| {
                *user == TEST_USER_UUID
                    && *p == product
                    && *quantity == 2
                    && size.as_deref() == Some("XL")
            })
            .return_once(|user, _, _, _| Ok(make_cart(user)));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({
                "product": product.into_uuid(),
                "quantity": 2,
                "selectedSize": "XL",
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_omitted_size_flows_as_none() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |_, p, _, size| *p == product && size.is_none())
            .return_once(|user, _, _, _| Ok(make_cart(user)));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product": product.into_uuid(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_zero_quantity_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _, _, _| Err(CartsServiceError::InvalidQuantity));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product": Uuid::now_v7(), "quantity": 0 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_unknown_product_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _, _, _| Err(CartsServiceError::ProductNotFound));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product": Uuid::now_v7(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
