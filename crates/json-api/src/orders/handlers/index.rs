//! Order Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::models::{OrderFilter, OrderStatus};

use crate::{
    extensions::*, orders::errors::into_status_error, orders::get::OrderResponse, state::State,
};

/// Order listing with its pagination block.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
    pub pagination: PaginationMeta,
}

/// Order Index Handler
///
/// Owner-scoped history; admins see all orders. Optional status filter.
#[endpoint(tags("orders"), summary = "List Orders", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;

    let status = status
        .into_inner()
        .map(|value| value.parse::<OrderStatus>())
        .transpose()
        .or_400("unknown order status")?;

    let page = (page, limit).into_page_request();

    let orders = state
        .app
        .orders
        .list_orders(actor, OrderFilter { status }, page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        pagination: PaginationMeta::from(&orders),
        orders: orders.items.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        orders::{
            MockOrdersService,
            models::{OrderStatus, OrderUuid},
        },
        paging::Page,
    };

    use crate::test_helpers::{TEST_USER, TEST_USER_UUID, make_order, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders").get(handler))
    }

    #[tokio::test]
    async fn test_index_scopes_to_the_actor() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|actor, filter, _| *actor == TEST_USER && filter.status.is_none())
            .return_once(|_, _, page| {
                Ok(Page::new(
                    vec![make_order(
                        OrderUuid::new(),
                        TEST_USER_UUID,
                        OrderStatus::Pending,
                    )],
                    1,
                    page,
                ))
            });

        let response: OrdersResponse = TestClient::get("http://example.com/orders")
            .send(&make_service(orders))
            .await
            .take_json()
            .await?;

        assert_eq!(response.orders.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_status_filter_flows_through() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|_, filter, _| filter.status == Some(OrderStatus::Completed))
            .return_once(|_, _, page| Ok(Page::new(vec![], 0, page)));

        let res = TestClient::get("http://example.com/orders?status=completed")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_status_returns_400() -> TestResult {
        let orders = MockOrdersService::new();

        let res = TestClient::get("http://example.com/orders?status=misplaced")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
