//! Create Coupon Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use storefront_app::domain::coupons::data::NewCoupon;

use crate::{
    coupons::{
        errors::into_status_error,
        models::{CouponResponse, CreateCouponRequest},
    },
    extensions::*,
    state::State,
};

/// Create Coupon Handler
#[endpoint(
    tags("coupons"),
    summary = "Create Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Coupon created"),
        (status_code = StatusCode::CONFLICT, description = "Coupon code already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCouponRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let coupon = NewCoupon::try_from(json.into_inner())?;

    let coupon = state
        .app
        .coupons
        .create_coupon(coupon)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(coupon.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront::coupons::CouponError;
    use testresult::TestResult;

    use storefront_app::domain::coupons::{CouponsServiceError, MockCouponsService};

    use crate::{
        errors::ErrorResponse,
        test_helpers::{Mocks, admin_service},
    };

    use super::{super::tests::*, *};

    fn make_service(coupons: MockCouponsService) -> Service {
        admin_service(
            Mocks {
                coupons,
                ..Mocks::default()
            },
            Router::with_path("coupons").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_coupon_returns_201() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_create_coupon()
            .once()
            .withf(|coupon| coupon.code == "save10" && coupon.minimum_amount == 50_00)
            .return_once(|coupon| Ok(make_coupon(coupon.uuid, "SAVE10")));

        let mut res = TestClient::post("http://example.com/coupons")
            .json(&json!({
                "code": "save10",
                "type": "percent",
                "value": "10",
                "minimum_amount": 5000,
            }))
            .send(&make_service(coupons))
            .await;

        let body: CouponResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.code, "SAVE10");

        Ok(())
    }

    #[tokio::test]
    async fn test_percentage_over_100_returns_400_message() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_create_coupon()
            .once()
            .return_once(|_| Err(CouponsServiceError::Invalid(CouponError::InvalidPercentage)));

        let mut res = TestClient::post("http://example.com/coupons")
            .json(&json!({ "code": "BIG", "type": "percent", "value": "150" }))
            .send(&make_service(coupons))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            body.message,
            "Percent coupon value must be greater than 0 and at most 100"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_type_never_reaches_service() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons.expect_create_coupon().never();

        let res = TestClient::post("http://example.com/coupons")
            .json(&json!({ "code": "BOGO", "type": "bogo", "value": "1" }))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
