//! Product Models

use std::str::FromStr;

use jiff::Timestamp;

use crate::{
    domain::taxonomy::models::{BrandUuid, CategoryUuid, TaxonRef},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: u64,
    pub stock: u32,
    pub rating: f64,
    pub brand: Option<BrandUuid>,
    pub category: CategoryUuid,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    /// Marks clearance/liquidation-priced inventory.
    pub is_clearance: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    /// First catalog image, used as the cart-line thumbnail.
    #[must_use]
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: u64,
    pub stock: u32,
    pub brand: Option<TaxonRef>,
    pub category: TaxonRef,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub is_clearance: bool,
}

/// Product Update Model. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: Option<u64>,
    pub stock: Option<u32>,
    pub rating: Option<f64>,
    pub brand: Option<TaxonRef>,
    pub category: Option<TaxonRef>,
    pub images: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub is_clearance: Option<bool>,
}

/// Dual-key product addressing: UUID and slug are mutually exclusive
/// alternate keys, and callers may present either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductKey {
    Uuid(ProductUuid),
    Slug(String),
}

impl ProductKey {
    /// Classify a raw path segment: a well-formed UUID addresses by id,
    /// anything else by slug.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();

        match value.parse::<ProductUuid>() {
            Ok(uuid) => Self::Uuid(uuid),
            Err(_) => Self::Slug(value.to_string()),
        }
    }
}

/// Independently-optional catalog filters, ANDed together; the free-text
/// `search` ORs across name, description and SKU.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<TaxonRef>,
    pub brand: Option<TaxonRef>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub search: Option<String>,
    pub clearance: Option<bool>,
}

/// Catalog sort orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Name,
}

/// Error for a sort string outside the fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order")]
pub struct UnknownSort;

impl FromStr for ProductSort {
    type Err = UnknownSort;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "newest" => Ok(Self::Newest),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "name" => Ok(Self::Name),
            _ => Err(UnknownSort),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_segment_addresses_by_id() {
        let uuid = ProductUuid::new();

        assert_eq!(
            ProductKey::parse(&uuid.to_string()),
            ProductKey::Uuid(uuid)
        );
    }

    #[test]
    fn non_uuid_segment_addresses_by_slug() {
        assert_eq!(
            ProductKey::parse("summer-linen-shirt"),
            ProductKey::Slug("summer-linen-shirt".to_string())
        );
    }

    #[test]
    fn sort_orders_parse() {
        assert_eq!("price_desc".parse::<ProductSort>(), Ok(ProductSort::PriceDesc));
        assert_eq!("sideways".parse::<ProductSort>(), Err(UnknownSort));
    }
}
