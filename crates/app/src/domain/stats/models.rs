//! Dashboard Models

use jiff::Timestamp;

use crate::domain::orders::models::{OrderStatus, OrderUuid};

/// Read-only rollups backing the admin dashboard.
#[derive(Debug, Clone)]
pub struct DashboardStats {
    pub total_products: u64,
    pub total_orders: u64,
    pub total_users: u64,
    pub pending_orders: u64,
    /// Sum of `total` across completed orders.
    pub completed_revenue: u64,
    /// Five most recent orders with the owning user joined in.
    pub recent_orders: Vec<RecentOrder>,
}

/// One row of the dashboard's recent-orders feed.
#[derive(Debug, Clone)]
pub struct RecentOrder {
    pub uuid: OrderUuid,
    pub total: u64,
    pub status: OrderStatus,
    pub user_name: String,
    pub user_email: String,
    pub created_at: Timestamp,
}
