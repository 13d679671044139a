//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{
    products::models::{ProductKey, ProductUpdate},
    taxonomy::models::TaxonRef,
};

use crate::{
    extensions::*, products::errors::into_status_error, products::get::ProductResponse,
    state::State,
};

/// Update Product Request; absent fields stay untouched.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: Option<u64>,
    pub stock: Option<u32>,
    pub rating: Option<f64>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub is_clearance: Option<bool>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            slug: request.slug,
            description: request.description,
            sku: request.sku,
            price: request.price,
            stock: request.stock,
            rating: request.rating,
            brand: request.brand.as_deref().map(TaxonRef::parse),
            category: request.category.as_deref().map(TaxonRef::parse),
            images: request.images,
            sizes: request.sizes,
            is_clearance: request.is_clearance,
        }
    }
}

/// Update Product Handler
///
/// The path segment addresses by UUID or by slug, whichever parses.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    key: PathParam<String>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let key = ProductKey::parse(&key.into_inner());

    let product = state
        .app
        .products
        .update_product(key, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::products::{
        MockProductsService, ProductsServiceError, models::ProductUuid,
    };

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products/{key}").put(handler))
    }

    #[tokio::test]
    async fn test_update_by_slug_flows_the_slug_key() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(|key, update| {
                *key == ProductKey::Slug("summer-linen-shirt".to_string())
                    && update.price == Some(99_000)
            })
            .return_once(move |_, _| Ok(make_product(uuid, 99_000)));

        let res = TestClient::put("http://example.com/products/summer-linen-shirt")
            .json(&json!({ "price": 99_000 }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::put("http://example.com/products/missing")
            .json(&json!({ "price": 1 }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
