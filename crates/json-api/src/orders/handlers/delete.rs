//! Delete Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Deleted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderDeletedResponse {
    pub message: String,
    pub uuid: Uuid,
}

/// Delete Order Handler
///
/// Owner-only, and only while the order is still pending.
#[endpoint(
    tags("orders"),
    summary = "Delete Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order is not pending"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the owner"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderDeletedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let uuid = order.into_inner();

    state
        .app
        .orders
        .delete_order(actor, uuid.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderDeletedResponse {
        message: "Order deleted".to_string(),
        uuid,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::orders::{
        MockOrdersService, OrdersServiceError, models::OrderUuid,
    };

    use crate::test_helpers::{TEST_USER, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders/{order}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_pending_order_returns_message_and_id() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_delete_order()
            .once()
            .withf(move |actor, order| *actor == TEST_USER && *order == uuid)
            .return_once(|_, _| Ok(()));

        let mut res = TestClient::delete(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrderDeletedResponse = res.take_json().await?;

        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_confirmed_order_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_delete_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotPending));

        let res = TestClient::delete(format!("http://example.com/orders/{}", OrderUuid::new()))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_someone_elses_order_returns_403() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_delete_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::Forbidden));

        let res = TestClient::delete(format!("http://example.com/orders/{}", OrderUuid::new()))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_then_404_on_next_lookup() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_delete_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
