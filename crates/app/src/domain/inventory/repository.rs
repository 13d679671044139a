//! Inventory Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    inventory::models::{InventoryAdjustment, InventoryAdjustmentUuid, StockLevel},
    products::models::ProductUuid,
    users::models::UserUuid,
};

const SET_STOCK_SQL: &str = include_str!("sql/set_stock.sql");
const CREATE_ADJUSTMENT_SQL: &str = include_str!("sql/create_adjustment.sql");
const LIST_ADJUSTMENTS_SQL: &str = include_str!("sql/list_adjustments.sql");
const LOW_STOCK_SQL: &str = include_str!("sql/low_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgInventoryRepository;

impl PgInventoryRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Write the product's absolute stock level, returning the new value.
    pub(crate) async fn set_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        stock: i32,
    ) -> Result<i32, sqlx::Error> {
        query_scalar::<Postgres, i32>(SET_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(stock)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_adjustment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        adjustment: &InventoryAdjustment,
    ) -> Result<(), sqlx::Error> {
        let resulting_stock = i32::try_from(adjustment.resulting_stock).unwrap_or(i32::MAX);

        sqlx::query(CREATE_ADJUSTMENT_SQL)
            .bind(adjustment.uuid.into_uuid())
            .bind(adjustment.product.into_uuid())
            .bind(adjustment.delta)
            .bind(resulting_stock)
            .bind(&adjustment.reason)
            .bind(adjustment.actor.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_adjustments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<InventoryAdjustment>, sqlx::Error> {
        query_as::<Postgres, InventoryAdjustment>(LIST_ADJUSTMENTS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn low_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        threshold: i32,
    ) -> Result<Vec<StockLevel>, sqlx::Error> {
        query_as::<Postgres, StockLevel>(LOW_STOCK_SQL)
            .bind(threshold)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for InventoryAdjustment {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let resulting_stock_i32: i32 = row.try_get("resulting_stock")?;
        let resulting_stock =
            u32::try_from(resulting_stock_i32).map_err(|e| sqlx::Error::ColumnDecode {
                index: "resulting_stock".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: InventoryAdjustmentUuid::from_uuid(row.try_get("uuid")?),
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            delta: row.try_get("delta")?,
            resulting_stock,
            reason: row.try_get("reason")?,
            actor: UserUuid::from_uuid(row.try_get("actor_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for StockLevel {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let stock_i32: i32 = row.try_get("stock")?;
        let stock = u32::try_from(stock_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "stock".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            product: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            sku: row.try_get("sku")?,
            stock,
        })
    }
}
