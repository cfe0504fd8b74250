//! Remove Coupon Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Remove Coupon Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Coupon removed"),
        (status_code = StatusCode::NOT_FOUND, description = "No coupon applied"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;

    state
        .app
        .carts
        .remove_coupon(customer.customer_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::{Mocks, TEST_CUSTOMER, customer_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        customer_service(
            Mocks {
                carts,
                ..Mocks::default()
            },
            Router::with_path("cart/coupon").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_remove_coupon_returns_204() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_coupon()
            .once()
            .withf(|customer| *customer == TEST_CUSTOMER.customer_uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete("http://example.com/cart/coupon")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_nothing_to_remove_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_coupon()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::delete("http://example.com/cart/coupon")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
