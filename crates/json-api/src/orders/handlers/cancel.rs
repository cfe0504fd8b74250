//! Cancel Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Cancel Order Handler
///
/// Only orders that are still `new` and unpaid can be cancelled.
#[endpoint(
    tags("orders"),
    summary = "Cancel Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order cancelled"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order can no longer be cancelled"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;

    let order = state
        .app
        .orders
        .cancel_order(customer.customer_uuid, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront::orders::OrderStatus;
    use testresult::TestResult;

    use storefront_app::domain::orders::{
        MockOrdersService, OrdersServiceError, records::OrderUuid,
    };

    use crate::{
        errors::ErrorResponse,
        test_helpers::{Mocks, customer_service},
    };

    use super::{super::tests::*, *};

    fn make_service(orders: MockOrdersService) -> Service {
        customer_service(
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("orders/{order}/cancel").post(handler),
        )
    }

    #[tokio::test]
    async fn test_cancel_returns_cancelled_order() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_cancel_order().once().return_once(|customer, order| {
            let mut record = make_order(order, customer);

            record.status = OrderStatus::Cancel;

            Ok(record)
        });

        let mut res = TestClient::post(format!("http://example.com/orders/{}/cancel", OrderUuid::new()))
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "cancel");

        Ok(())
    }

    #[tokio::test]
    async fn test_processed_order_cannot_be_cancelled() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_cancel_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotCancellable));

        let mut res = TestClient::post(format!("http://example.com/orders/{}/cancel", OrderUuid::new()))
            .send(&make_service(orders))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Order can no longer be cancelled");

        Ok(())
    }
}
