//! Promotions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    products::repository::try_get_amount,
    promotions::models::{NewPromotion, Promotion, PromotionUpdate, PromotionUuid},
};

const LIST_PROMOTIONS_SQL: &str = include_str!("sql/list_promotions.sql");
const GET_PROMOTION_SQL: &str = include_str!("sql/get_promotion.sql");
const FIND_PROMOTION_BY_CODE_SQL: &str = include_str!("sql/find_promotion_by_code.sql");
const CREATE_PROMOTION_SQL: &str = include_str!("sql/create_promotion.sql");
const UPDATE_PROMOTION_SQL: &str = include_str!("sql/update_promotion.sql");
const DELETE_PROMOTION_SQL: &str = include_str!("sql/delete_promotion.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromotionsRepository;

impl PgPromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Promotion>, sqlx::Error> {
        query_as::<Postgres, Promotion>(LIST_PROMOTIONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<Promotion, sqlx::Error> {
        query_as::<Postgres, Promotion>(GET_PROMOTION_SQL)
            .bind(promotion.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_promotion_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<Promotion>, sqlx::Error> {
        query_as::<Postgres, Promotion>(FIND_PROMOTION_BY_CODE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: PromotionUuid,
        promotion: &NewPromotion,
        code: &str,
    ) -> Result<Promotion, sqlx::Error> {
        let discount = i64::try_from(promotion.discount).unwrap_or(i64::MAX);

        query_as::<Postgres, Promotion>(CREATE_PROMOTION_SQL)
            .bind(uuid.into_uuid())
            .bind(code)
            .bind(discount)
            .bind(promotion.discount_type.as_str())
            .bind(promotion.max_uses.map(i64::from))
            .bind(promotion.active)
            .bind(promotion.starts_at.map(SqlxTimestamp::from))
            .bind(promotion.ends_at.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
        update: &PromotionUpdate,
    ) -> Result<Promotion, sqlx::Error> {
        query_as::<Postgres, Promotion>(UPDATE_PROMOTION_SQL)
            .bind(promotion.into_uuid())
            .bind(update.discount.map(|d| i64::try_from(d).unwrap_or(i64::MAX)))
            .bind(update.discount_type.map(|t| t.as_str()))
            .bind(update.max_uses.map(i64::from))
            .bind(update.current_uses.map(i64::from))
            .bind(update.active)
            .bind(update.starts_at.map(SqlxTimestamp::from))
            .bind(update.ends_at.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: PromotionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PROMOTION_SQL)
            .bind(promotion.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Promotion {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let discount_type: String = row.try_get("discount_type")?;

        let discount_type =
            discount_type
                .parse()
                .map_err(|e: crate::domain::promotions::models::UnknownDiscountType| {
                    sqlx::Error::ColumnDecode {
                        index: "discount_type".to_string(),
                        source: Box::new(e),
                    }
                })?;

        let max_uses = row
            .try_get::<Option<i64>, _>("max_uses")?
            .map(|value| {
                u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "max_uses".to_string(),
                    source: Box::new(e),
                })
            })
            .transpose()?;

        let current_uses_i64: i64 = row.try_get("current_uses")?;
        let current_uses =
            u32::try_from(current_uses_i64).map_err(|e| sqlx::Error::ColumnDecode {
                index: "current_uses".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: PromotionUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            discount: try_get_amount(row, "discount")?,
            discount_type,
            max_uses,
            current_uses,
            active: row.try_get("active")?,
            starts_at: row
                .try_get::<Option<SqlxTimestamp>, _>("starts_at")?
                .map(SqlxTimestamp::to_jiff),
            ends_at: row
                .try_get::<Option<SqlxTimestamp>, _>("ends_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
