//! Promotion Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Promotion UUID
pub type PromotionUuid = TypedUuid<Promotion>;

/// How a promotion's `discount` value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// `discount` is a percentage of the order total, 0–100.
    Percentage,
    /// `discount` is a flat amount in minor units, capped at the total.
    Fixed,
}

impl DiscountType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountType {
    type Err = UnknownDiscountType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "percentage" => Ok(Self::Percentage),
            "fixed" => Ok(Self::Fixed),
            _ => Err(UnknownDiscountType),
        }
    }
}

/// Error for a discount type string outside the fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown discount type")]
pub struct UnknownDiscountType;

/// Promotion Model
#[derive(Debug, Clone)]
pub struct Promotion {
    pub uuid: PromotionUuid,
    /// Stored uppercase; lookups uppercase their input.
    pub code: String,
    pub discount: u64,
    pub discount_type: DiscountType,
    pub max_uses: Option<u32>,
    pub current_uses: u32,
    pub active: bool,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Promotion {
    /// Amount this promotion takes off the given order total.
    #[must_use]
    pub fn discount_amount(&self, order_total: u64) -> u64 {
        match self.discount_type {
            DiscountType::Percentage => order_total.saturating_mul(self.discount) / 100,
            DiscountType::Fixed => self.discount.min(order_total),
        }
    }
}

/// New Promotion payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromotion {
    pub code: String,
    pub discount: u64,
    pub discount_type: DiscountType,
    pub max_uses: Option<u32>,
    pub active: bool,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}

/// Promotion update; `None` fields are left untouched. The code itself is
/// immutable once created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromotionUpdate {
    pub discount: Option<u64>,
    pub discount_type: Option<DiscountType>,
    pub max_uses: Option<u32>,
    pub current_uses: Option<u32>,
    pub active: Option<bool>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}

/// The outcome of validating a code against an order total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountQuote {
    pub code: String,
    pub discount_amount: u64,
    pub discounted_total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn promotion(discount: u64, discount_type: DiscountType) -> Promotion {
        Promotion {
            uuid: PromotionUuid::new(),
            code: "SALE10".to_string(),
            discount,
            discount_type,
            max_uses: None,
            current_uses: 0,
            active: true,
            starts_at: None,
            ends_at: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn percentage_discount_floors() {
        let promo = promotion(10, DiscountType::Percentage);

        assert_eq!(promo.discount_amount(200_000), 20_000);
        assert_eq!(promo.discount_amount(99), 9);
    }

    #[test]
    fn fixed_discount_caps_at_total() {
        let promo = promotion(50_000, DiscountType::Fixed);

        assert_eq!(promo.discount_amount(200_000), 50_000);
        assert_eq!(promo.discount_amount(30_000), 30_000);
    }
}
