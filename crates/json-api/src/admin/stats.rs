//! Dashboard Stats Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::stats::models::{DashboardStats, RecentOrder};

use crate::{extensions::*, state::State};

/// Dashboard rollups.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatsResponse {
    pub total_products: u64,
    pub total_orders: u64,
    pub total_users: u64,
    pub pending_orders: u64,
    pub completed_revenue: u64,
    pub recent_orders: Vec<RecentOrderResponse>,
}

/// One row of the recent-orders feed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecentOrderResponse {
    pub uuid: Uuid,
    pub total: u64,
    pub status: String,
    pub user_name: String,
    pub user_email: String,
    pub created_at: String,
}

impl From<RecentOrder> for RecentOrderResponse {
    fn from(order: RecentOrder) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            total: order.total,
            status: order.status.as_str().to_string(),
            user_name: order.user_name,
            user_email: order.user_email,
            created_at: order.created_at.to_string(),
        }
    }
}

impl From<DashboardStats> for StatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_products: stats.total_products,
            total_orders: stats.total_orders,
            total_users: stats.total_users,
            pending_orders: stats.pending_orders,
            completed_revenue: stats.completed_revenue,
            recent_orders: stats.recent_orders.into_iter().map(Into::into).collect(),
        }
    }
}

/// Dashboard Stats Handler
///
/// Read-only rollups for the admin dashboard.
#[endpoint(tags("admin"), summary = "Dashboard Stats", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state
        .app
        .stats
        .dashboard()
        .await
        .or_500("failed to compute dashboard stats")?;

    Ok(Json(stats.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        orders::models::{OrderStatus, OrderUuid},
        stats::MockStatsService,
    };

    use crate::test_helpers::stats_service;

    use super::*;

    #[tokio::test]
    async fn test_stats_returns_rollups() -> TestResult {
        let mut stats = MockStatsService::new();

        stats.expect_dashboard().once().return_once(|| {
            Ok(DashboardStats {
                total_products: 42,
                total_orders: 10,
                total_users: 7,
                pending_orders: 3,
                completed_revenue: 1_250_000,
                recent_orders: vec![RecentOrder {
                    uuid: OrderUuid::new(),
                    total: 200_000,
                    status: OrderStatus::Completed,
                    user_name: "Minh".to_string(),
                    user_email: "minh@example.com".to_string(),
                    created_at: Timestamp::UNIX_EPOCH,
                }],
            })
        });

        let service = stats_service(stats, Router::with_path("admin/stats").get(handler));

        let response: StatsResponse = TestClient::get("http://example.com/admin/stats")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(response.total_products, 42);
        assert_eq!(response.pending_orders, 3);
        assert_eq!(response.completed_revenue, 1_250_000);
        assert_eq!(response.recent_orders.len(), 1);
        assert_eq!(response.recent_orders[0].user_email, "minh@example.com");

        Ok(())
    }
}
