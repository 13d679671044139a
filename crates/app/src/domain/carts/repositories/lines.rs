//! Cart Lines Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    carts::models::{CartLine, CartLineUuid, CartUuid},
    products::models::ProductUuid,
    products::repository::try_get_amount,
};

const GET_CART_LINES_SQL: &str = include_str!("../sql/get_cart_lines.sql");
const FIND_MATCHING_LINE_SQL: &str = include_str!("../sql/find_matching_line.sql");
const CREATE_CART_LINE_SQL: &str = include_str!("../sql/create_cart_line.sql");
const ACCUMULATE_LINE_SQL: &str = include_str!("../sql/accumulate_line.sql");
const SET_LINE_QUANTITY_SQL: &str = include_str!("../sql/set_line_quantity.sql");
const DELETE_CART_LINE_SQL: &str = include_str!("../sql/delete_cart_line.sql");
const CLEAR_CART_LINES_SQL: &str = include_str!("../sql/clear_cart_lines.sql");

/// Column values for a fresh cart line.
#[derive(Debug, Clone)]
pub(crate) struct CartLineInsert {
    pub uuid: CartLineUuid,
    pub product: ProductUuid,
    pub quantity: i32,
    pub unit_price: i64,
    pub selected_size: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartLinesRepository;

impl PgCartLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(GET_CART_LINES_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Find the line matching (product, size). NULL sizes compare equal via
    /// IS NOT DISTINCT FROM, so "no size" matches "no size".
    pub(crate) async fn find_matching_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        product: ProductUuid,
        selected_size: Option<&str>,
    ) -> Result<Option<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(FIND_MATCHING_LINE_SQL)
            .bind(cart.into_uuid())
            .bind(product.into_uuid())
            .bind(selected_size)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        line: &CartLineInsert,
    ) -> Result<CartLine, sqlx::Error> {
        query_as::<Postgres, CartLine>(CREATE_CART_LINE_SQL)
            .bind(line.uuid.into_uuid())
            .bind(cart.into_uuid())
            .bind(line.product.into_uuid())
            .bind(line.quantity)
            .bind(line.unit_price)
            .bind(&line.selected_size)
            .bind(&line.image_url)
            .fetch_one(&mut **tx)
            .await
    }

    /// Merge a repeat add into an existing line: quantity accumulates, the
    /// stored unit price is overwritten with the current catalog price.
    pub(crate) async fn accumulate_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: CartLineUuid,
        quantity: i32,
        unit_price: i64,
    ) -> Result<CartLine, sqlx::Error> {
        query_as::<Postgres, CartLine>(ACCUMULATE_LINE_SQL)
            .bind(line.into_uuid())
            .bind(quantity)
            .bind(unit_price)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_line_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        line: CartLineUuid,
        quantity: i32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_LINE_QUANTITY_SQL)
            .bind(line.into_uuid())
            .bind(cart.into_uuid())
            .bind(quantity)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        line: CartLineUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_LINE_SQL)
            .bind(line.into_uuid())
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_LINES_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let unit_price = try_get_amount(row, "unit_price")?;

        let quantity_i32: i32 = row.try_get("quantity")?;
        let quantity = u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: CartLineUuid::from_uuid(row.try_get("uuid")?),
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity,
            unit_price,
            selected_size: row.try_get("selected_size")?,
            image_url: row.try_get("image_url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
