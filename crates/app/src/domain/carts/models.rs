//! Cart Models

use jiff::Timestamp;

use crate::{
    domain::{products::models::ProductUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Cart Line UUID
pub type CartLineUuid = TypedUuid<CartLine>;

/// Cart Model
///
/// One cart per user, created lazily on first access and emptied (never
/// deleted) by checkout.
#[derive(Debug, Clone)]
pub struct Cart {
    pub uuid: CartUuid,
    pub user: UserUuid,
    pub lines: Vec<CartLine>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Cart {
    /// Sum of line unit prices times quantities.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| line.unit_price.saturating_mul(u64::from(line.quantity)))
            .sum()
    }
}

/// One cart entry, keyed by (product, selected size).
#[derive(Debug, Clone)]
pub struct CartLine {
    pub uuid: CartLineUuid,
    pub product: ProductUuid,
    pub quantity: u32,
    /// Product price as of the most recent add of this line.
    pub unit_price: u64,
    pub selected_size: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Normalise a client-supplied size: trimmed, with absent and empty
/// collapsed to `None` so that "no size" on both sides compares equal.
#[must_use]
pub fn normalize_size(size: Option<&str>) -> Option<String> {
    size.map(str::trim)
        .filter(|size| !size.is_empty())
        .map(ToString::to_string)
}
