//! Taxonomy Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::taxonomy::models::{Brand, BrandUuid, Category, CategoryUuid};

const LIST_BRANDS_SQL: &str = include_str!("sql/list_brands.sql");
const GET_BRAND_SQL: &str = include_str!("sql/get_brand.sql");
const FIND_BRAND_BY_NAME_SQL: &str = include_str!("sql/find_brand_by_name.sql");
const CREATE_BRAND_SQL: &str = include_str!("sql/create_brand.sql");
const UPDATE_BRAND_SQL: &str = include_str!("sql/update_brand.sql");
const DELETE_BRAND_SQL: &str = include_str!("sql/delete_brand.sql");

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const GET_CATEGORY_SQL: &str = include_str!("sql/get_category.sql");
const FIND_CATEGORY_BY_NAME_SQL: &str = include_str!("sql/find_category_by_name.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const UPDATE_CATEGORY_SQL: &str = include_str!("sql/update_category.sql");
const DELETE_CATEGORY_SQL: &str = include_str!("sql/delete_category.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTaxonomyRepository;

impl PgTaxonomyRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_brands(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Brand>, sqlx::Error> {
        query_as::<Postgres, Brand>(LIST_BRANDS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand: BrandUuid,
    ) -> Result<Brand, sqlx::Error> {
        query_as::<Postgres, Brand>(GET_BRAND_SQL)
            .bind(brand.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_brand_by_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<Option<Brand>, sqlx::Error> {
        query_as::<Postgres, Brand>(FIND_BRAND_BY_NAME_SQL)
            .bind(name)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand: BrandUuid,
        name: &str,
        slug: &str,
    ) -> Result<Brand, sqlx::Error> {
        query_as::<Postgres, Brand>(CREATE_BRAND_SQL)
            .bind(brand.into_uuid())
            .bind(name)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand: BrandUuid,
        name: Option<&str>,
        slug: Option<&str>,
    ) -> Result<Brand, sqlx::Error> {
        query_as::<Postgres, Brand>(UPDATE_BRAND_SQL)
            .bind(brand.into_uuid())
            .bind(name)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand: BrandUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_BRAND_SQL)
            .bind(brand.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Category>, sqlx::Error> {
        query_as::<Postgres, Category>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<Category, sqlx::Error> {
        query_as::<Postgres, Category>(GET_CATEGORY_SQL)
            .bind(category.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_category_by_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<Option<Category>, sqlx::Error> {
        query_as::<Postgres, Category>(FIND_CATEGORY_BY_NAME_SQL)
            .bind(name)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
        name: &str,
        slug: &str,
    ) -> Result<Category, sqlx::Error> {
        query_as::<Postgres, Category>(CREATE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .bind(name)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
        name: Option<&str>,
        slug: Option<&str>,
    ) -> Result<Category, sqlx::Error> {
        query_as::<Postgres, Category>(UPDATE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .bind(name)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Brand {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: BrandUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Category {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
