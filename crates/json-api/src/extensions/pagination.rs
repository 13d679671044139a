//! Pagination query helpers shared by listing endpoints.

use salvo::oapi::{ToSchema, extract::QueryParam};
use serde::{Deserialize, Serialize};

use storefront_app::domain::paging::{Page, PageRequest};

/// Pagination block returned alongside every listed collection.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaginationMeta {
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    pub total: u64,
}

impl<T> From<&Page<T>> for PaginationMeta {
    fn from(page: &Page<T>) -> Self {
        Self {
            current_page: page.current_page,
            total_pages: page.total_pages(),
            page_size: page.page_size,
            total: page.total,
        }
    }
}

/// Parse `page`/`limit` query values into a clamped request.
pub(crate) trait PageParamsExt {
    fn into_page_request(self) -> PageRequest;
}

impl PageParamsExt for (QueryParam<u32, false>, QueryParam<u32, false>) {
    fn into_page_request(self) -> PageRequest {
        let (page, limit) = self;

        PageRequest::new(page.into_inner(), limit.into_inner())
    }
}
