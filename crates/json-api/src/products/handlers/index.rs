//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    pagination::{PageMeta, page_from_query},
    products::{
        errors::into_status_error,
        models::{ProductResponse, render_product},
    },
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    pub products: Vec<ProductResponse>,
    pub meta: PageMeta,
}

/// Product Index Handler
///
/// Lists live products, newest first.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    per_page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products(page_from_query(page, per_page))
        .await
        .map_err(into_status_error)?;

    let meta = PageMeta::from(&products);

    Ok(Json(ProductsResponse {
        products: products
            .items
            .into_iter()
            .map(render_product)
            .collect::<Result<_, _>>()?,
        meta,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::{
        domain::products::{MockProductsService, records::ProductUuid},
        pagination::{MAX_PER_PAGE, Page, Paginated},
    };

    use crate::test_helpers::{Mocks, public_service};

    use super::{super::tests::*, *};

    fn make_service(products: MockProductsService) -> Service {
        public_service(
            Mocks {
                products,
                ..Mocks::default()
            },
            Router::with_path("products").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_returns_page() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|page| *page == Page::new(Some(2), Some(1)))
            .return_once(move |page| {
                Ok(Paginated {
                    items: vec![make_product(uuid)],
                    total: 3,
                    page,
                })
            });

        let mut res = TestClient::get("http://example.com/products?page=2&per_page=1")
            .send(&make_service(products))
            .await;

        let body: ProductsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.products.len(), 1);
        assert_eq!(
            body.meta,
            PageMeta {
                page: 2,
                per_page: 1,
                total: 3,
                last_page: 3,
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_per_page_is_clamped() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|page| page.per_page() == MAX_PER_PAGE && page.page() == 1)
            .return_once(|page| {
                Ok(Paginated {
                    items: Vec::new(),
                    total: 0,
                    page,
                })
            });

        let res = TestClient::get("http://example.com/products?per_page=500")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
