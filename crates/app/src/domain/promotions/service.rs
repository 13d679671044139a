//! Promotions service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::promotions::{
        errors::PromotionsServiceError,
        models::{
            DiscountQuote, DiscountType, NewPromotion, Promotion, PromotionUpdate, PromotionUuid,
        },
        repository::PgPromotionsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgPromotionsService {
    db: Db,
    repository: PgPromotionsRepository,
}

impl PgPromotionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgPromotionsRepository::new(),
        }
    }
}

fn normalize_code(code: &str) -> Result<String, PromotionsServiceError> {
    let code = code.trim().to_uppercase();

    if code.is_empty() {
        return Err(PromotionsServiceError::MissingRequiredData);
    }

    Ok(code)
}

fn check_discount(
    discount: u64,
    discount_type: DiscountType,
) -> Result<(), PromotionsServiceError> {
    if discount_type == DiscountType::Percentage && discount > 100 {
        return Err(PromotionsServiceError::InvalidDiscount);
    }

    Ok(())
}

/// Check a promotion's gates against the clock and its counters.
fn check_usable(promotion: &Promotion, now: Timestamp) -> Result<(), PromotionsServiceError> {
    if !promotion.active {
        return Err(PromotionsServiceError::Inactive);
    }

    if promotion.starts_at.is_some_and(|starts| now < starts) {
        return Err(PromotionsServiceError::NotStarted);
    }

    if promotion.ends_at.is_some_and(|ends| now > ends) {
        return Err(PromotionsServiceError::Expired);
    }

    if promotion
        .max_uses
        .is_some_and(|max| promotion.current_uses >= max)
    {
        return Err(PromotionsServiceError::Exhausted);
    }

    Ok(())
}

#[async_trait]
impl PromotionsService for PgPromotionsService {
    async fn list_promotions(&self) -> Result<Vec<Promotion>, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let promotions = self.repository.list_promotions(&mut tx).await?;

        tx.commit().await?;

        Ok(promotions)
    }

    async fn get_promotion(
        &self,
        promotion: PromotionUuid,
    ) -> Result<Promotion, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let promotion = self.repository.get_promotion(&mut tx, promotion).await?;

        tx.commit().await?;

        Ok(promotion)
    }

    #[tracing::instrument(name = "promotions.service.create_promotion", skip_all, err)]
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<Promotion, PromotionsServiceError> {
        let code = normalize_code(&promotion.code)?;

        check_discount(promotion.discount, promotion.discount_type)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_promotion(&mut tx, PromotionUuid::new(), &promotion, &code)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_promotion(
        &self,
        promotion: PromotionUuid,
        update: PromotionUpdate,
    ) -> Result<Promotion, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.get_promotion(&mut tx, promotion).await?;

        let discount = update.discount.unwrap_or(current.discount);
        let discount_type = update.discount_type.unwrap_or(current.discount_type);

        check_discount(discount, discount_type)?;

        let updated = self
            .repository
            .update_promotion(&mut tx, promotion, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_promotion(
        &self,
        promotion: PromotionUuid,
    ) -> Result<(), PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_promotion(&mut tx, promotion).await?;

        if rows_affected == 0 {
            return Err(PromotionsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn validate_code(
        &self,
        code: &str,
        order_total: u64,
    ) -> Result<DiscountQuote, PromotionsServiceError> {
        let code = normalize_code(code)?;

        let mut tx = self.db.begin().await?;

        let promotion = self
            .repository
            .find_promotion_by_code(&mut tx, &code)
            .await?
            .ok_or(PromotionsServiceError::NotFound)?;

        tx.commit().await?;

        check_usable(&promotion, Timestamp::now())?;

        let discount_amount = promotion.discount_amount(order_total);

        Ok(DiscountQuote {
            code: promotion.code,
            discount_amount,
            discounted_total: order_total - discount_amount,
        })
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// All promotions, newest first.
    async fn list_promotions(&self) -> Result<Vec<Promotion>, PromotionsServiceError>;

    /// Retrieve a single promotion.
    async fn get_promotion(
        &self,
        promotion: PromotionUuid,
    ) -> Result<Promotion, PromotionsServiceError>;

    /// Create a promotion; codes are uppercased and must be unique.
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<Promotion, PromotionsServiceError>;

    /// Patch a promotion; the code itself is immutable.
    async fn update_promotion(
        &self,
        promotion: PromotionUuid,
        update: PromotionUpdate,
    ) -> Result<Promotion, PromotionsServiceError>;

    /// Delete a promotion.
    async fn delete_promotion(
        &self,
        promotion: PromotionUuid,
    ) -> Result<(), PromotionsServiceError>;

    /// Check a code against the clock, counters and flags, and quote the
    /// discount it would apply to the given total. Read-only.
    async fn validate_code(
        &self,
        code: &str,
        order_total: u64,
    ) -> Result<DiscountQuote, PromotionsServiceError>;
}
