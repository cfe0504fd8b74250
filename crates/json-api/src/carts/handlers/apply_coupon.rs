//! Apply Coupon Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{errors::into_status_error, models::AppliedCouponResponse},
    extensions::*,
    state::State,
};

/// Apply Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplyCouponRequest {
    pub code: String,
}

/// Apply Coupon Handler
///
/// Validates the code against the current cart and remembers it for checkout.
#[endpoint(
    tags("cart"),
    summary = "Apply Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Coupon applied"),
        (status_code = StatusCode::BAD_REQUEST, description = "Coupon rejected"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ApplyCouponRequest>,
    depot: &mut Depot,
) -> Result<Json<AppliedCouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;

    let applied = state
        .app
        .carts
        .apply_coupon(customer.customer_uuid, &json.into_inner().code)
        .await
        .map_err(into_status_error)?;

    Ok(Json(applied.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront::coupons::{CouponError, CouponKind};
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService, records::AppliedCouponRecord},
        coupons::records::CouponUuid,
    };

    use crate::{
        errors::ErrorResponse,
        test_helpers::{Mocks, customer_service},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        customer_service(
            Mocks {
                carts,
                ..Mocks::default()
            },
            Router::with_path("cart/coupon").post(handler),
        )
    }

    #[tokio::test]
    async fn test_apply_coupon_returns_discount() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_apply_coupon()
            .once()
            .withf(|_, code| code == "save10")
            .return_once(|_, _| {
                Ok(AppliedCouponRecord {
                    uuid: CouponUuid::new(),
                    code: "SAVE10".to_string(),
                    kind: CouponKind::Percent {
                        percentage: Decimal::TEN,
                    },
                    discount: 10_00,
                })
            });

        let mut res = TestClient::post("http://example.com/cart/coupon")
            .json(&json!({ "code": "save10" }))
            .send(&make_service(carts))
            .await;

        let body: AppliedCouponResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.discount, 10_00);
        assert_eq!(body.kind, "percent");

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_coupon_returns_400_message() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_apply_coupon()
            .once()
            .return_once(|_, _| Err(CartsServiceError::Coupon(CouponError::Expired)));

        let mut res = TestClient::post("http://example.com/cart/coupon")
            .json(&json!({ "code": "OLD" }))
            .send(&make_service(carts))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Coupon has expired");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_code_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_apply_coupon()
            .once()
            .return_once(|_, _| Err(CartsServiceError::Coupon(CouponError::InvalidOrInactive)));

        let res = TestClient::post("http://example.com/cart/coupon")
            .json(&json!({ "code": "NOPE" }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
