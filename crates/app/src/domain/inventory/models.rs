//! Inventory Models

use jiff::Timestamp;

use crate::{
    domain::{products::models::ProductUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Inventory Adjustment UUID
pub type InventoryAdjustmentUuid = TypedUuid<InventoryAdjustment>;

/// One append-only entry in a product's stock audit trail.
#[derive(Debug, Clone)]
pub struct InventoryAdjustment {
    pub uuid: InventoryAdjustmentUuid,
    pub product: ProductUuid,
    /// Signed stock change applied by this entry.
    pub delta: i32,
    /// Stock level after the change.
    pub resulting_stock: u32,
    pub reason: Option<String>,
    /// Admin who made the change.
    pub actor: UserUuid,
    pub created_at: Timestamp,
}

/// A product's current stock, as listed by low-stock reports.
#[derive(Debug, Clone)]
pub struct StockLevel {
    pub product: ProductUuid,
    pub name: String,
    pub sku: Option<String>,
    pub stock: u32,
}
