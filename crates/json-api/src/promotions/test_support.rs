//! Promotion test fixtures.

use jiff::Timestamp;

use storefront_app::domain::promotions::models::{DiscountType, Promotion, PromotionUuid};

pub(crate) fn make_promotion(uuid: PromotionUuid, code: &str) -> Promotion {
    Promotion {
        uuid,
        code: code.to_string(),
        discount: 10,
        discount_type: DiscountType::Percentage,
        max_uses: Some(100),
        current_uses: 3,
        active: true,
        starts_at: None,
        ends_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
