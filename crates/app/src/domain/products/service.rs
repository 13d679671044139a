//! Products service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        paging::{Page, PageRequest},
        products::{
            errors::ProductsServiceError,
            models::{
                NewProduct, Product, ProductFilter, ProductKey, ProductSort, ProductUpdate,
                ProductUuid,
            },
            repository::{PgProductsRepository, ProductInsert, ProductPatch, ResolvedProductFilter},
        },
        slug::slugify,
        taxonomy::{models::TaxonRef, repository::PgTaxonomyRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    taxonomy: PgTaxonomyRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            taxonomy: PgTaxonomyRepository::new(),
        }
    }

    /// Resolve a client-supplied brand reference to its UUID. Unknown names
    /// are an invalid reference; raw UUIDs pass through and the foreign key
    /// remains the final arbiter.
    async fn resolve_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reference: TaxonRef,
    ) -> Result<Uuid, ProductsServiceError> {
        match reference {
            TaxonRef::Uuid(uuid) => Ok(uuid),
            TaxonRef::Name(name) => self
                .taxonomy
                .find_brand_by_name(tx, &name)
                .await?
                .map(|brand| brand.uuid.into_uuid())
                .ok_or(ProductsServiceError::InvalidReference),
        }
    }

    async fn resolve_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reference: TaxonRef,
    ) -> Result<Uuid, ProductsServiceError> {
        match reference {
            TaxonRef::Uuid(uuid) => Ok(uuid),
            TaxonRef::Name(name) => self
                .taxonomy
                .find_category_by_name(tx, &name)
                .await?
                .map(|category| category.uuid.into_uuid())
                .ok_or(ProductsServiceError::InvalidReference),
        }
    }

    /// Resolve filter references. `Ok(None)` means a referenced name does
    /// not exist, so the filtered listing is empty by construction.
    async fn resolve_filter(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: ProductFilter,
    ) -> Result<Option<ResolvedProductFilter>, ProductsServiceError> {
        let category = match filter.category {
            None => None,
            Some(TaxonRef::Uuid(uuid)) => Some(uuid),
            Some(TaxonRef::Name(name)) => {
                match self.taxonomy.find_category_by_name(tx, &name).await? {
                    Some(category) => Some(category.uuid.into_uuid()),
                    None => return Ok(None),
                }
            }
        };

        let brand = match filter.brand {
            None => None,
            Some(TaxonRef::Uuid(uuid)) => Some(uuid),
            Some(TaxonRef::Name(name)) => {
                match self.taxonomy.find_brand_by_name(tx, &name).await? {
                    Some(brand) => Some(brand.uuid.into_uuid()),
                    None => return Ok(None),
                }
            }
        };

        Ok(Some(ResolvedProductFilter {
            category,
            brand,
            min_price: filter.min_price.map(to_amount).transpose()?,
            max_price: filter.max_price.map(to_amount).transpose()?,
            search: filter
                .search
                .and_then(|s| (!s.trim().is_empty()).then(|| s.trim().to_string())),
            clearance: filter.clearance,
        }))
    }
}

fn to_amount(value: u64) -> Result<i64, ProductsServiceError> {
    i64::try_from(value).map_err(|_| ProductsServiceError::InvalidData)
}

fn to_stock(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn validate_rating(rating: f64) -> Result<f64, ProductsServiceError> {
    if (0.0..=5.0).contains(&rating) {
        Ok(rating)
    } else {
        Err(ProductsServiceError::InvalidData)
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
        sort: ProductSort,
        page: PageRequest,
    ) -> Result<Page<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(resolved) = self.resolve_filter(&mut tx, filter).await? else {
            return Ok(Page::new(vec![], 0, page));
        };

        let products = self
            .repository
            .list_products(&mut tx, &resolved, sort, page)
            .await?;

        let total = self.repository.count_products(&mut tx, &resolved).await?;

        tx.commit().await?;

        Ok(Page::new(products, total, page))
    }

    async fn get_product(&self, key: ProductKey) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, &key).await?;

        tx.commit().await?;

        Ok(product)
    }

    #[tracing::instrument(name = "products.service.create_product", skip_all, err)]
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let name = product.name.trim().to_string();

        if name.is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        let slug = match product.slug {
            Some(slug) if !slug.trim().is_empty() => slug.trim().to_string(),
            _ => slugify(&name),
        };

        let mut tx = self.db.begin().await?;

        let brand = match product.brand {
            Some(reference) => Some(self.resolve_brand(&mut tx, reference).await?),
            None => None,
        };

        let category = self.resolve_category(&mut tx, product.category).await?;

        let created = self
            .repository
            .create_product(
                &mut tx,
                &ProductInsert {
                    uuid: ProductUuid::new(),
                    name,
                    slug,
                    description: product.description,
                    sku: product.sku,
                    price: to_amount(product.price)?,
                    stock: to_stock(product.stock),
                    brand,
                    category,
                    images: product.images,
                    sizes: product.sizes,
                    is_clearance: product.is_clearance,
                },
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    #[tracing::instrument(name = "products.service.update_product", skip(self, update), err)]
    async fn update_product(
        &self,
        key: ProductKey,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let brand = match update.brand {
            Some(reference) => Some(self.resolve_brand(&mut tx, reference).await?),
            None => None,
        };

        let category = match update.category {
            Some(reference) => Some(self.resolve_category(&mut tx, reference).await?),
            None => None,
        };

        let patch = ProductPatch {
            name: update.name,
            slug: update.slug,
            description: update.description,
            sku: update.sku,
            price: update.price.map(to_amount).transpose()?,
            stock: update.stock.map(to_stock),
            rating: update.rating.map(validate_rating).transpose()?,
            brand,
            category,
            images: update.images,
            sizes: update.sizes,
            is_clearance: update.is_clearance,
        };

        let updated = self.repository.update_product(&mut tx, &key, &patch).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, key: ProductKey) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, &key).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Filtered, sorted, paginated catalog listing.
    async fn list_products(
        &self,
        filter: ProductFilter,
        sort: ProductSort,
        page: PageRequest,
    ) -> Result<Page<Product>, ProductsServiceError>;

    /// Retrieve a single product by UUID or slug.
    async fn get_product(&self, key: ProductKey) -> Result<Product, ProductsServiceError>;

    /// Create a product, resolving brand/category references by UUID or name.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Patch a product addressed by UUID or slug.
    async fn update_product(
        &self,
        key: ProductKey,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Delete a product addressed by UUID or slug.
    async fn delete_product(&self, key: ProductKey) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_enforced() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(5.0).is_ok());
        assert!(matches!(
            validate_rating(5.1),
            Err(ProductsServiceError::InvalidData)
        ));
        assert!(matches!(
            validate_rating(-0.5),
            Err(ProductsServiceError::InvalidData)
        ));
    }

    #[test]
    fn amounts_fit_in_storage() {
        assert_eq!(to_amount(100_000).unwrap(), 100_000);
        assert!(matches!(
            to_amount(u64::MAX),
            Err(ProductsServiceError::InvalidData)
        ));
    }
}
