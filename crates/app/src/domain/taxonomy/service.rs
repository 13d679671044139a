//! Taxonomy service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        slug::slugify,
        taxonomy::{
            errors::TaxonomyServiceError,
            models::{Brand, BrandUuid, Category, CategoryUuid, NewTaxon, TaxonUpdate},
            repository::PgTaxonomyRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgTaxonomyService {
    db: Db,
    repository: PgTaxonomyRepository,
}

impl PgTaxonomyService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTaxonomyRepository::new(),
        }
    }
}

fn prepare(taxon: NewTaxon) -> Result<(String, String), TaxonomyServiceError> {
    let name = taxon.name.trim().to_string();

    if name.is_empty() {
        return Err(TaxonomyServiceError::MissingRequiredData);
    }

    let slug = match taxon.slug {
        Some(slug) if !slug.trim().is_empty() => slug.trim().to_string(),
        _ => slugify(&name),
    };

    Ok((name, slug))
}

#[async_trait]
impl TaxonomyService for PgTaxonomyService {
    async fn list_brands(&self) -> Result<Vec<Brand>, TaxonomyServiceError> {
        let mut tx = self.db.begin().await?;

        let brands = self.repository.list_brands(&mut tx).await?;

        tx.commit().await?;

        Ok(brands)
    }

    async fn create_brand(&self, taxon: NewTaxon) -> Result<Brand, TaxonomyServiceError> {
        let (name, slug) = prepare(taxon)?;

        let mut tx = self.db.begin().await?;

        let brand = self
            .repository
            .create_brand(&mut tx, BrandUuid::new(), &name, &slug)
            .await?;

        tx.commit().await?;

        Ok(brand)
    }

    async fn update_brand(
        &self,
        brand: BrandUuid,
        update: TaxonUpdate,
    ) -> Result<Brand, TaxonomyServiceError> {
        let mut tx = self.db.begin().await?;

        let brand = self
            .repository
            .update_brand(&mut tx, brand, update.name.as_deref(), update.slug.as_deref())
            .await?;

        tx.commit().await?;

        Ok(brand)
    }

    async fn delete_brand(&self, brand: BrandUuid) -> Result<(), TaxonomyServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_brand(&mut tx, brand).await?;

        if rows_affected == 0 {
            return Err(TaxonomyServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, TaxonomyServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn create_category(&self, taxon: NewTaxon) -> Result<Category, TaxonomyServiceError> {
        let (name, slug) = prepare(taxon)?;

        let mut tx = self.db.begin().await?;

        let category = self
            .repository
            .create_category(&mut tx, CategoryUuid::new(), &name, &slug)
            .await?;

        tx.commit().await?;

        Ok(category)
    }

    async fn update_category(
        &self,
        category: CategoryUuid,
        update: TaxonUpdate,
    ) -> Result<Category, TaxonomyServiceError> {
        let mut tx = self.db.begin().await?;

        let category = self
            .repository
            .update_category(
                &mut tx,
                category,
                update.name.as_deref(),
                update.slug.as_deref(),
            )
            .await?;

        tx.commit().await?;

        Ok(category)
    }

    async fn delete_category(&self, category: CategoryUuid) -> Result<(), TaxonomyServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_category(&mut tx, category).await?;

        if rows_affected == 0 {
            return Err(TaxonomyServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait TaxonomyService: Send + Sync {
    /// All brands, sorted by name.
    async fn list_brands(&self) -> Result<Vec<Brand>, TaxonomyServiceError>;

    /// Create a brand, deriving the slug from the name when absent.
    async fn create_brand(&self, taxon: NewTaxon) -> Result<Brand, TaxonomyServiceError>;

    /// Rename a brand or replace its slug.
    async fn update_brand(
        &self,
        brand: BrandUuid,
        update: TaxonUpdate,
    ) -> Result<Brand, TaxonomyServiceError>;

    /// Delete a brand; fails while products still reference it.
    async fn delete_brand(&self, brand: BrandUuid) -> Result<(), TaxonomyServiceError>;

    /// All categories, sorted by name.
    async fn list_categories(&self) -> Result<Vec<Category>, TaxonomyServiceError>;

    /// Create a category, deriving the slug from the name when absent.
    async fn create_category(&self, taxon: NewTaxon) -> Result<Category, TaxonomyServiceError>;

    /// Rename a category or replace its slug.
    async fn update_category(
        &self,
        category: CategoryUuid,
        update: TaxonUpdate,
    ) -> Result<Category, TaxonomyServiceError>;

    /// Delete a category; fails while products still reference it.
    async fn delete_category(&self, category: CategoryUuid) -> Result<(), TaxonomyServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_derives_slug_from_name() {
        let (name, slug) = prepare(NewTaxon {
            name: " Running Shoes ".to_string(),
            slug: None,
        })
        .unwrap();

        assert_eq!(name, "Running Shoes");
        assert_eq!(slug, "running-shoes");
    }

    #[test]
    fn prepare_keeps_explicit_slug() {
        let (_, slug) = prepare(NewTaxon {
            name: "Running Shoes".to_string(),
            slug: Some("runners".to_string()),
        })
        .unwrap();

        assert_eq!(slug, "runners");
    }

    #[test]
    fn prepare_rejects_blank_name() {
        let result = prepare(NewTaxon {
            name: "   ".to_string(),
            slug: None,
        });

        assert!(matches!(
            result,
            Err(TaxonomyServiceError::MissingRequiredData)
        ));
    }
}
