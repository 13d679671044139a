//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::models::{NewOrder, NewOrderLine};

use crate::{
    extensions::*, orders::errors::into_status_error, orders::get::OrderResponse, state::State,
};

/// Create Order Request: the client-submitted line snapshot.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub total: u64,
    pub payment_method: String,
    pub shipping_address: String,
    pub notes: Option<String>,
}

/// One submitted line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemRequest {
    pub product: Uuid,
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    pub selected_size: Option<String>,
    pub image_url: Option<String>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            lines: request
                .items
                .into_iter()
                .map(|item| NewOrderLine {
                    product: item.product.into(),
                    name: item.name,
                    unit_price: item.price,
                    quantity: item.quantity,
                    selected_size: item.selected_size,
                    image_url: item.image_url,
                })
                .collect(),
            total: request.total,
            payment_method: request.payment_method,
            shipping_address: request.shipping_address,
            notes: request.notes,
        }
    }
}

/// Create Order Handler
///
/// Snapshots the submitted lines and empties the caller's cart.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty items or invalid total"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let order = state
        .app
        .orders
        .create_order(actor.user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        orders::{MockOrdersService, OrdersServiceError, models::OrderUuid},
        products::models::ProductUuid,
    };

    use crate::test_helpers::{TEST_USER_UUID, make_order, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders").post(handler))
    }

    #[tokio::test]
    async fn test_create_order_snapshots_submitted_lines() -> TestResult {
        let product = ProductUuid::new();
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .withf(move |user, order| {
                *user == TEST_USER_UUID
                    && order.total == 200_000
                    && order.lines.len() == 1
                    && order.lines[0].unit_price == 100_000
                    && order.lines[0].quantity == 2
            })
            .return_once(move |user, _| {
                Ok(make_order(
                    uuid,
                    user,
                    storefront_app::domain::orders::models::OrderStatus::Pending,
                ))
            });

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "items": [{
                    "product": product.into_uuid(),
                    "name": "Summer Linen Shirt",
                    "price": 100_000,
                    "quantity": 2,
                }],
                "total": 200_000,
                "paymentMethod": "cod",
                "shippingAddress": "12 Hang Bai, Hanoi",
            }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_empty_items_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::EmptyOrder));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "items": [],
                "total": 0,
                "paymentMethod": "cod",
                "shippingAddress": "12 Hang Bai, Hanoi",
            }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_negative_total_rejected_by_parsing() -> TestResult {
        let orders = MockOrdersService::new();

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "items": [{
                    "product": Uuid::now_v7(),
                    "name": "Shirt",
                    "price": 100,
                    "quantity": 1,
                }],
                "total": -200_000,
                "paymentMethod": "cod",
                "shippingAddress": "12 Hang Bai, Hanoi",
            }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
