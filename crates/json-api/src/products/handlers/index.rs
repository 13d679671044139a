//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{
    products::models::{ProductFilter, ProductSort},
    taxonomy::models::TaxonRef,
};

use crate::{
    extensions::*, products::errors::into_status_error, products::get::ProductResponse,
    state::State,
};

/// Product listing with its pagination block.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The page of products
    pub products: Vec<ProductResponse>,
    pub pagination: PaginationMeta,
}

/// Product Index Handler
///
/// Filters compose independently; `search` matches name, description and
/// SKU case-insensitively.
#[endpoint(tags("products"), summary = "List Products")]
#[allow(clippy::too_many_arguments)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    brand: QueryParam<String, false>,
    min_price: QueryParam<u64, false>,
    max_price: QueryParam<u64, false>,
    search: QueryParam<String, false>,
    clearance: QueryParam<bool, false>,
    sort: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = ProductFilter {
        category: category.into_inner().as_deref().map(TaxonRef::parse),
        brand: brand.into_inner().as_deref().map(TaxonRef::parse),
        min_price: min_price.into_inner(),
        max_price: max_price.into_inner(),
        search: search.into_inner(),
        clearance: clearance.into_inner(),
    };

    let sort = sort
        .into_inner()
        .map(|value| value.parse::<ProductSort>())
        .transpose()
        .or_400("unknown sort order")?
        .unwrap_or_default();

    let page = (page, limit).into_page_request();

    let products = state
        .app
        .products
        .list_products(filter, sort, page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        pagination: PaginationMeta::from(&products),
        products: products.items.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use storefront_app::domain::{
        paging::{Page, PageRequest},
        products::{MockProductsService, models::ProductUuid},
    };

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_products_with_pagination() -> TestResult {
        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(move |_, _, page| {
                Ok(Page::new(
                    vec![make_product(uuid_a, 100), make_product(uuid_b, 200)],
                    2,
                    page,
                ))
            });

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert_eq!(response.products.len(), 2, "expected two products");
        assert_eq!(response.pagination.total, 2);
        assert_eq!(response.pagination.current_page, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_limit_and_page_flow_through() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|_, _, page| page.page() == 2 && page.limit() == 12)
            .return_once(|_, _, page| Ok(Page::new(vec![], 25, page)));

        let response: ProductsResponse =
            TestClient::get("http://example.com/products?page=2&limit=12")
                .send(&make_service(products))
                .await
                .take_json()
                .await?;

        assert_eq!(response.pagination.current_page, 2);
        assert!(response.products.len() <= 12, "page respects the limit");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_filters_flow_through() -> TestResult {
        let category = Uuid::now_v7();

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(move |filter, sort, _| {
                filter.category == Some(TaxonRef::Uuid(category))
                    && filter.brand == Some(TaxonRef::Name("Acme".to_string()))
                    && filter.min_price == Some(1_000)
                    && filter.max_price == Some(5_000)
                    && filter.search.as_deref() == Some("linen")
                    && *sort == ProductSort::PriceAsc
            })
            .return_once(|_, _, page| Ok(Page::new(vec![], 0, page)));

        let url = format!(
            "http://example.com/products?category={category}&brand=Acme&min_price=1000&max_price=5000&search=linen&sort=price_asc"
        );

        let res = TestClient::get(url).send(&make_service(products)).await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_bad_sort_returns_400() -> TestResult {
        let products = MockProductsService::new();

        let res = TestClient::get("http://example.com/products?sort=sideways")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
