//! Pagination query and response metadata.

use salvo::oapi::{ToSchema, extract::QueryParam};
use serde::{Deserialize, Serialize};
use storefront_app::pagination::{Page, Paginated};

/// Read `page` and `per_page`; out-of-range values are clamped.
pub(crate) fn page_from_query(page: QueryParam<u32, false>, per_page: QueryParam<u32, false>) -> Page {
    Page::new(page.into_inner(), per_page.into_inner())
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub(crate) struct PageMeta {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub last_page: u64,
}

impl<T> From<&Paginated<T>> for PageMeta {
    fn from(paginated: &Paginated<T>) -> Self {
        Self {
            page: paginated.page.page(),
            per_page: paginated.page.per_page(),
            total: paginated.total,
            last_page: paginated.last_page(),
        }
    }
}
