//! Stats service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::stats::{
        errors::StatsServiceError, models::DashboardStats, repository::PgStatsRepository,
    },
};

/// How many orders the dashboard's recent-orders feed shows.
const RECENT_ORDER_LIMIT: i64 = 5;

#[derive(Debug, Clone)]
pub struct PgStatsService {
    db: Db,
    repository: PgStatsRepository,
}

impl PgStatsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStatsRepository::new(),
        }
    }
}

#[async_trait]
impl StatsService for PgStatsService {
    async fn dashboard(&self) -> Result<DashboardStats, StatsServiceError> {
        let mut tx = self.db.begin().await?;

        let total_products = self.repository.count_products(&mut tx).await?;
        let total_orders = self.repository.count_orders(&mut tx).await?;
        let total_users = self.repository.count_users(&mut tx).await?;
        let pending_orders = self.repository.count_pending_orders(&mut tx).await?;
        let completed_revenue = self.repository.completed_revenue(&mut tx).await?;
        let recent_orders = self
            .repository
            .recent_orders(&mut tx, RECENT_ORDER_LIMIT)
            .await?;

        tx.commit().await?;

        Ok(DashboardStats {
            total_products,
            total_orders,
            total_users,
            pending_orders,
            completed_revenue,
            recent_orders,
        })
    }
}

#[automock]
#[async_trait]
pub trait StatsService: Send + Sync {
    /// All dashboard rollups in one pure read.
    async fn dashboard(&self) -> Result<DashboardStats, StatsServiceError>;
}
