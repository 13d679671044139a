//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::models::OrderStatus;

use crate::{
    extensions::*, orders::errors::into_status_error, orders::get::OrderResponse, state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    pub status: String,
}

/// Update Order Status Handler
///
/// Admin-only; transitions follow the order lifecycle edges.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status or illegal transition"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .or_400("unknown order status")?;

    let order = state
        .app
        .orders
        .update_status(order.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::orders::{
        MockOrdersService, OrdersServiceError, models::OrderUuid,
    };

    use crate::test_helpers::{TEST_USER_UUID, admin_orders_service, make_order};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        admin_orders_service(
            orders,
            Router::with_path("orders/{order}/status").put(handler),
        )
    }

    #[tokio::test]
    async fn test_legal_transition_succeeds() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .withf(move |order, status| *order == uuid && *status == OrderStatus::Confirmed)
            .return_once(|order, status| Ok(make_order(order, TEST_USER_UUID, status)));

        let res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "confirmed" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_illegal_transition_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .return_once(|_, _| {
                Err(OrdersServiceError::InvalidTransition {
                    from: OrderStatus::Completed,
                    to: OrderStatus::Pending,
                })
            });

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "pending" }))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_status_outside_enum_returns_400() -> TestResult {
        let orders = MockOrdersService::new();

        let res = TestClient::put(format!(
            "http://example.com/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "teleported" }))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
