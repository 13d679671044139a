//! Order Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{products::models::ProductUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Line UUID
pub type OrderLineUuid = TypedUuid<OrderLine>;

/// Order lifecycle state.
///
/// Legal transitions: `pending → {confirmed, cancelled}`,
/// `confirmed → {shipping, cancelled}`, `shipping → completed`.
/// `completed` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipping,
    Completed,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipping => "shipping",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether moving to `next` follows a legal lifecycle edge.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Shipping | Self::Cancelled)
                | (Self::Shipping, Self::Completed)
        )
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "shipping" => Ok(Self::Shipping),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(UnknownStatus),
        }
    }
}

/// Error for a status string outside the fixed enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status")]
pub struct UnknownStatus;

/// Order Model
///
/// Lines are a value-copy snapshot of catalog data at purchase time;
/// later product edits never alter them.
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub lines: Vec<OrderLine>,
    pub total: u64,
    pub payment_method: String,
    pub shipping_address: String,
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One purchased line, frozen at checkout.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub uuid: OrderLineUuid,
    /// Reference back to the catalog product; intentionally not a foreign
    /// key, so catalog deletions cannot rewrite history.
    pub product: ProductUuid,
    pub name: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub selected_size: Option<String>,
    pub image_url: Option<String>,
}

/// New Order payload: the client-submitted snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub lines: Vec<NewOrderLine>,
    pub total: u64,
    pub payment_method: String,
    pub shipping_address: String,
    pub notes: Option<String>,
}

/// One submitted line.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderLine {
    pub product: ProductUuid,
    pub name: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub selected_size: Option<String>,
    pub image_url: Option<String>,
}

/// Listing filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_edges_accepted() {
        use OrderStatus::*;

        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Shipping));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(Shipping.can_transition_to(Completed));
    }

    #[test]
    fn illegal_edges_rejected() {
        use OrderStatus::*;

        assert!(!Pending.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Shipping));
        assert!(!Shipping.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Confirmed));
    }

    #[test]
    fn terminal_states() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Shipping.is_terminal());
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Shipping,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
    }
}
