//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    orders::models::{NewOrderLine, Order, OrderLine, OrderLineUuid, OrderStatus, OrderUuid},
    paging::PageRequest,
    products::{models::ProductUuid, repository::try_get_amount},
    users::models::UserUuid,
};

const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_LINES_SQL: &str = include_str!("sql/get_order_lines.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_LINE_SQL: &str = include_str!("sql/create_order_line.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("sql/count_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const DELETE_ORDER_SQL: &str = include_str!("sql/delete_order.sql");

/// Column values for the order row itself.
#[derive(Debug, Clone)]
pub(crate) struct OrderInsert {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub total: i64,
    pub payment_method: String,
    pub shipping_address: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderLine>, sqlx::Error> {
        query_as::<Postgres, OrderLine>(GET_ORDER_LINES_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        insert: &OrderInsert,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(insert.uuid.into_uuid())
            .bind(insert.user.into_uuid())
            .bind(insert.total)
            .bind(&insert.payment_method)
            .bind(&insert.shipping_address)
            .bind(&insert.notes)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        line: &NewOrderLine,
    ) -> Result<OrderLine, sqlx::Error> {
        let unit_price = i64::try_from(line.unit_price).unwrap_or(i64::MAX);
        let quantity = i32::try_from(line.quantity).unwrap_or(i32::MAX);

        query_as::<Postgres, OrderLine>(CREATE_ORDER_LINE_SQL)
            .bind(OrderLineUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(line.product.into_uuid())
            .bind(&line.name)
            .bind(unit_price)
            .bind(quantity)
            .bind(&line.selected_size)
            .bind(&line.image_url)
            .fetch_one(&mut **tx)
            .await
    }

    /// List orders, optionally scoped to one owner and one status. NULL
    /// parameters disable the corresponding predicate.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: Option<UserUuid>,
        status: Option<OrderStatus>,
        page: PageRequest,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(owner.map(UserUuid::into_uuid))
            .bind(status.map(OrderStatus::as_str))
            .bind(i64::from(page.limit()))
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: Option<UserUuid>,
        status: Option<OrderStatus>,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_ORDERS_SQL)
            .bind(owner.map(UserUuid::into_uuid))
            .bind(status.map(OrderStatus::as_str))
            .fetch_one(&mut **tx)
            .await?;

        Ok(count.unsigned_abs())
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

pub(crate) fn try_get_status(row: &PgRow, col: &str) -> Result<OrderStatus, sqlx::Error> {
    let status: String = row.try_get(col)?;

    status
        .parse::<OrderStatus>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: col.to_string(),
            source: Box::new(e),
        })
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user: UserUuid::from_uuid(row.try_get::<Uuid, _>("user_uuid")?),
            lines: Vec::new(),
            total: try_get_amount(row, "total")?,
            payment_method: row.try_get("payment_method")?,
            shipping_address: row.try_get("shipping_address")?,
            notes: row.try_get("notes")?,
            status: try_get_status(row, "status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity_i32: i32 = row.try_get("quantity")?;
        let quantity = u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: OrderLineUuid::from_uuid(row.try_get("uuid")?),
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            name: row.try_get("name")?,
            unit_price: try_get_amount(row, "unit_price")?,
            quantity,
            selected_size: row.try_get("selected_size")?,
            image_url: row.try_get("image_url")?,
        })
    }
}
