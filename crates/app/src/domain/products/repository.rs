//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, QueryBuilder, Row, Transaction, postgres::PgRow, query, query_as,
};
use uuid::Uuid;

use crate::domain::{
    paging::PageRequest,
    products::models::{Product, ProductKey, ProductSort, ProductUuid},
    taxonomy::models::{BrandUuid, CategoryUuid},
};

const GET_PRODUCT_BY_UUID_SQL: &str = include_str!("sql/get_product_by_uuid.sql");
const GET_PRODUCT_BY_SLUG_SQL: &str = include_str!("sql/get_product_by_slug.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_BY_UUID_SQL: &str = include_str!("sql/update_product_by_uuid.sql");
const UPDATE_PRODUCT_BY_SLUG_SQL: &str = include_str!("sql/update_product_by_slug.sql");
const DELETE_PRODUCT_BY_UUID_SQL: &str = include_str!("sql/delete_product_by_uuid.sql");
const DELETE_PRODUCT_BY_SLUG_SQL: &str = include_str!("sql/delete_product_by_slug.sql");

const PRODUCT_COLUMNS: &str = "uuid, name, slug, description, sku, price, stock, rating, \
     brand_uuid, category_uuid, images, sizes, is_clearance, created_at, updated_at";

/// Filter with taxonomy references already resolved to UUIDs.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResolvedProductFilter {
    pub category: Option<Uuid>,
    pub brand: Option<Uuid>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub search: Option<String>,
    pub clearance: Option<bool>,
}

/// Column values for a product insert, references resolved.
#[derive(Debug, Clone)]
pub(crate) struct ProductInsert {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: i64,
    pub stock: i32,
    pub brand: Option<Uuid>,
    pub category: Uuid,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub is_clearance: bool,
}

/// Column patch for a product update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub(crate) struct ProductPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i32>,
    pub rating: Option<f64>,
    pub brand: Option<Uuid>,
    pub category: Option<Uuid>,
    pub images: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub is_clearance: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ResolvedProductFilter,
        sort: ProductSort,
        page: PageRequest,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let mut builder = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));

        push_filter_predicates(&mut builder, filter);

        builder.push(match sort {
            ProductSort::Newest => " ORDER BY created_at DESC",
            ProductSort::PriceAsc => " ORDER BY price ASC",
            ProductSort::PriceDesc => " ORDER BY price DESC",
            ProductSort::Name => " ORDER BY name ASC",
        });

        builder.push(" LIMIT ");
        builder.push_bind(i64::from(page.limit()));
        builder.push(" OFFSET ");
        builder.push_bind(page.offset());

        builder
            .build_query_as::<Product>()
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ResolvedProductFilter,
    ) -> Result<u64, sqlx::Error> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM products");

        push_filter_predicates(&mut builder, filter);

        let count: i64 = builder.build_query_scalar().fetch_one(&mut **tx).await?;

        Ok(count.unsigned_abs())
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &ProductKey,
    ) -> Result<Product, sqlx::Error> {
        match key {
            ProductKey::Uuid(uuid) => {
                query_as::<Postgres, Product>(GET_PRODUCT_BY_UUID_SQL)
                    .bind(uuid.into_uuid())
                    .fetch_one(&mut **tx)
                    .await
            }
            ProductKey::Slug(slug) => {
                query_as::<Postgres, Product>(GET_PRODUCT_BY_SLUG_SQL)
                    .bind(slug)
                    .fetch_one(&mut **tx)
                    .await
            }
        }
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        insert: &ProductInsert,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(insert.uuid.into_uuid())
            .bind(&insert.name)
            .bind(&insert.slug)
            .bind(&insert.description)
            .bind(&insert.sku)
            .bind(insert.price)
            .bind(insert.stock)
            .bind(insert.brand)
            .bind(insert.category)
            .bind(&insert.images)
            .bind(&insert.sizes)
            .bind(insert.is_clearance)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &ProductKey,
        patch: &ProductPatch,
    ) -> Result<Product, sqlx::Error> {
        let query = match key {
            ProductKey::Uuid(uuid) => {
                query_as::<Postgres, Product>(UPDATE_PRODUCT_BY_UUID_SQL).bind(uuid.into_uuid())
            }
            ProductKey::Slug(slug) => {
                query_as::<Postgres, Product>(UPDATE_PRODUCT_BY_SLUG_SQL).bind(slug.as_str())
            }
        };

        query
            .bind(&patch.name)
            .bind(&patch.slug)
            .bind(&patch.description)
            .bind(&patch.sku)
            .bind(patch.price)
            .bind(patch.stock)
            .bind(patch.rating)
            .bind(patch.brand)
            .bind(patch.category)
            .bind(&patch.images)
            .bind(&patch.sizes)
            .bind(patch.is_clearance)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &ProductKey,
    ) -> Result<u64, sqlx::Error> {
        let result = match key {
            ProductKey::Uuid(uuid) => {
                query(DELETE_PRODUCT_BY_UUID_SQL)
                    .bind(uuid.into_uuid())
                    .execute(&mut **tx)
                    .await?
            }
            ProductKey::Slug(slug) => {
                query(DELETE_PRODUCT_BY_SLUG_SQL)
                    .bind(slug)
                    .execute(&mut **tx)
                    .await?
            }
        };

        Ok(result.rows_affected())
    }
}

fn push_filter_predicates(builder: &mut QueryBuilder<'_, Postgres>, filter: &ResolvedProductFilter) {
    builder.push(" WHERE TRUE");

    if let Some(category) = filter.category {
        builder.push(" AND category_uuid = ");
        builder.push_bind(category);
    }

    if let Some(brand) = filter.brand {
        builder.push(" AND brand_uuid = ");
        builder.push_bind(brand);
    }

    if let Some(min_price) = filter.min_price {
        builder.push(" AND price >= ");
        builder.push_bind(min_price);
    }

    if let Some(max_price) = filter.max_price {
        builder.push(" AND price <= ");
        builder.push_bind(max_price);
    }

    if let Some(clearance) = filter.clearance {
        builder.push(" AND is_clearance = ");
        builder.push_bind(clearance);
    }

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(search));

        builder.push(" AND (name ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR description ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR sku ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }
}

/// Escape LIKE metacharacters so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());

    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }

        escaped.push(ch);
    }

    escaped
}

pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price = try_get_amount(row, "price")?;

        let stock_i32: i32 = row.try_get("stock")?;
        let stock = u32::try_from(stock_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "stock".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            sku: row.try_get("sku")?,
            price,
            stock,
            rating: row.try_get("rating")?,
            brand: row
                .try_get::<Option<Uuid>, _>("brand_uuid")?
                .map(BrandUuid::from_uuid),
            category: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
            images: row.try_get("images")?,
            sizes: row.try_get("sizes")?,
            is_clearance: row.try_get("is_clearance")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
