//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::models::{Product, ProductKey};

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: u64,
    pub stock: u32,
    pub rating: f64,
    pub brand: Option<Uuid>,
    pub category: Uuid,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub is_clearance: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            name: product.name,
            slug: product.slug,
            description: product.description,
            sku: product.sku,
            price: product.price,
            stock: product.stock,
            rating: product.rating,
            brand: product.brand.map(Into::into),
            category: product.category.into_uuid(),
            images: product.images,
            sizes: product.sizes,
            is_clearance: product.is_clearance,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// The path segment addresses by UUID or by slug, whichever parses.
#[endpoint(tags("products"), summary = "Get Product")]
pub(crate) async fn handler(
    key: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let key = ProductKey::parse(&key.into_inner());

    let product = state
        .app
        .products
        .get_product(key)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::products::{
        MockProductsService, ProductsServiceError, models::ProductUuid,
    };

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products/{key}").get(handler))
    }

    #[tokio::test]
    async fn test_get_by_uuid_dispatches_the_uuid_arm() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .withf(move |key| *key == ProductKey::Uuid(uuid))
            .return_once(move |_| Ok(make_product(uuid, 150_000)));

        let mut res = TestClient::get(format!("http://example.com/products/{uuid}"))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.price, 150_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_by_slug_dispatches_the_slug_arm() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .withf(|key| *key == ProductKey::Slug("summer-linen-shirt".to_string()))
            .return_once(move |_| Ok(make_product(uuid, 150_000)));

        let res = TestClient::get("http://example.com/products/summer-linen-shirt")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::get("http://example.com/products/missing")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
