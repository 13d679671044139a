//! Inventory service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    auth::models::Actor,
    database::Db,
    domain::{
        inventory::{
            errors::InventoryServiceError,
            models::{InventoryAdjustment, InventoryAdjustmentUuid, StockLevel},
            repository::PgInventoryRepository,
        },
        products::{
            models::{Product, ProductKey},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgInventoryService {
    db: Db,
    repository: PgInventoryRepository,
    products: PgProductsRepository,
}

impl PgInventoryService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgInventoryRepository::new(),
            products: PgProductsRepository::new(),
        }
    }

    async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &ProductKey,
    ) -> Result<Product, InventoryServiceError> {
        self.products
            .get_product(tx, key)
            .await
            .map_err(InventoryServiceError::from)
    }

    /// Write the new level and append the audit entry in one transaction.
    async fn apply(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        actor: Actor,
        product: &Product,
        new_stock: u32,
        reason: Option<String>,
    ) -> Result<StockLevel, InventoryServiceError> {
        let new_stock_i32 = i32::try_from(new_stock).unwrap_or(i32::MAX);
        let old_stock_i32 = i32::try_from(product.stock).unwrap_or(i32::MAX);

        let written = self
            .repository
            .set_stock(tx, product.uuid, new_stock_i32)
            .await?;

        self.repository
            .create_adjustment(
                tx,
                &InventoryAdjustment {
                    uuid: InventoryAdjustmentUuid::new(),
                    product: product.uuid,
                    delta: new_stock_i32 - old_stock_i32,
                    resulting_stock: new_stock,
                    reason,
                    actor: actor.user,
                    created_at: Timestamp::now(),
                },
            )
            .await?;

        Ok(StockLevel {
            product: product.uuid,
            name: product.name.clone(),
            sku: product.sku.clone(),
            stock: u32::try_from(written).unwrap_or(0),
        })
    }
}

#[async_trait]
impl InventoryService for PgInventoryService {
    #[tracing::instrument(name = "inventory.service.set_stock", skip(self, actor, reason), err)]
    async fn set_stock(
        &self,
        actor: Actor,
        key: ProductKey,
        stock: u32,
        reason: Option<String>,
    ) -> Result<StockLevel, InventoryServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.get_product(&mut tx, &key).await?;
        let level = self.apply(&mut tx, actor, &product, stock, reason).await?;

        tx.commit().await?;

        Ok(level)
    }

    #[tracing::instrument(name = "inventory.service.adjust_stock", skip(self, actor, reason), err)]
    async fn adjust_stock(
        &self,
        actor: Actor,
        key: ProductKey,
        delta: i32,
        reason: Option<String>,
    ) -> Result<StockLevel, InventoryServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.get_product(&mut tx, &key).await?;

        let current = i64::from(product.stock);
        let next = current + i64::from(delta);

        if next < 0 {
            return Err(InventoryServiceError::InsufficientStock);
        }

        let next = u32::try_from(next).unwrap_or(u32::MAX);

        let level = self.apply(&mut tx, actor, &product, next, reason).await?;

        tx.commit().await?;

        Ok(level)
    }

    async fn low_stock(&self, threshold: u32) -> Result<Vec<StockLevel>, InventoryServiceError> {
        let mut tx = self.db.begin().await?;

        let threshold = i32::try_from(threshold).unwrap_or(i32::MAX);
        let levels = self.repository.low_stock(&mut tx, threshold).await?;

        tx.commit().await?;

        Ok(levels)
    }

    async fn adjustments(
        &self,
        key: ProductKey,
    ) -> Result<Vec<InventoryAdjustment>, InventoryServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.get_product(&mut tx, &key).await?;

        let adjustments = self
            .repository
            .list_adjustments(&mut tx, product.uuid)
            .await?;

        tx.commit().await?;

        Ok(adjustments)
    }
}

#[automock]
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Replace a product's stock level outright.
    async fn set_stock(
        &self,
        actor: Actor,
        key: ProductKey,
        stock: u32,
        reason: Option<String>,
    ) -> Result<StockLevel, InventoryServiceError>;

    /// Apply a signed stock delta; never drives stock below zero.
    async fn adjust_stock(
        &self,
        actor: Actor,
        key: ProductKey,
        delta: i32,
        reason: Option<String>,
    ) -> Result<StockLevel, InventoryServiceError>;

    /// Products at or below the given stock threshold.
    async fn low_stock(&self, threshold: u32) -> Result<Vec<StockLevel>, InventoryServiceError>;

    /// A product's stock audit trail, newest first.
    async fn adjustments(
        &self,
        key: ProductKey,
    ) -> Result<Vec<InventoryAdjustment>, InventoryServiceError>;
}
