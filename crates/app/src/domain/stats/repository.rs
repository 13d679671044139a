//! Stats Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    orders::{models::OrderUuid, repository::try_get_status},
    products::repository::try_get_amount,
    stats::models::RecentOrder,
};

const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const COUNT_ORDERS_SQL: &str = include_str!("sql/count_orders.sql");
const COUNT_USERS_SQL: &str = include_str!("sql/count_users.sql");
const COUNT_PENDING_ORDERS_SQL: &str = include_str!("sql/count_pending_orders.sql");
const COMPLETED_REVENUE_SQL: &str = include_str!("sql/completed_revenue.sql");
const RECENT_ORDERS_SQL: &str = include_str!("sql/recent_orders.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStatsRepository;

impl PgStatsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        count(tx, COUNT_PRODUCTS_SQL).await
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        count(tx, COUNT_ORDERS_SQL).await
    }

    pub(crate) async fn count_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        count(tx, COUNT_USERS_SQL).await
    }

    pub(crate) async fn count_pending_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        count(tx, COUNT_PENDING_ORDERS_SQL).await
    }

    /// SUM of totals over completed orders; empty sums read as zero.
    pub(crate) async fn completed_revenue(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let revenue: i64 = query_scalar(COMPLETED_REVENUE_SQL)
            .fetch_one(&mut **tx)
            .await?;

        Ok(revenue.unsigned_abs())
    }

    pub(crate) async fn recent_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
    ) -> Result<Vec<RecentOrder>, sqlx::Error> {
        query_as::<Postgres, RecentOrder>(RECENT_ORDERS_SQL)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }
}

async fn count(tx: &mut Transaction<'_, Postgres>, sql: &str) -> Result<u64, sqlx::Error> {
    let count: i64 = query_scalar(sql).fetch_one(&mut **tx).await?;

    Ok(count.unsigned_abs())
}

impl<'r> FromRow<'r, PgRow> for RecentOrder {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            total: try_get_amount(row, "total")?,
            status: try_get_status(row, "status")?,
            user_name: row.try_get("user_name")?,
            user_email: row.try_get("user_email")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
