//! Payment Webhook Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::{
    extensions::*,
    observability::observe_payment_outcome,
    payments::errors::webhook_rejection,
    state::State,
};

/// Webhook Response
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub(crate) struct WebhookResponse {
    /// `success` or `error`
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Payment Webhook Handler
///
/// Gateway notifications. A PayPal `PAYMENT.CAPTURE.COMPLETED` event marks
/// the matching order paid; other events are acknowledged.
#[endpoint(
    tags("payments"),
    summary = "Payment Webhook",
    responses(
        (status_code = StatusCode::OK, description = "Notification accepted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown gateway or invalid payload"),
    ),
)]
pub(crate) async fn handler(
    gateway: PathParam<String>,
    json: JsonBody<Value>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<WebhookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let gateway = gateway.into_inner();

    match state
        .app
        .payments
        .handle_webhook(&gateway, json.into_inner())
        .await
    {
        Ok(()) => {
            info!(gateway = %gateway, "payment webhook handled");

            observe_payment_outcome("webhook", true);

            Ok(Json(WebhookResponse {
                status: "success".to_string(),
                message: None,
            }))
        }
        Err(error) => {
            let (status, message) = webhook_rejection(error);

            observe_payment_outcome("webhook", false);

            res.status_code(status);

            Ok(Json(WebhookResponse {
                status: "error".to_string(),
                message: Some(message),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::payments::{MockPaymentsService, PaymentsServiceError};

    use crate::test_helpers::{Mocks, public_service};

    use super::*;

    fn make_service(payments: MockPaymentsService) -> Service {
        public_service(
            Mocks {
                payments,
                ..Mocks::default()
            },
            Router::with_path("webhook/{gateway}").post(handler),
        )
    }

    #[tokio::test]
    async fn test_capture_event_is_acknowledged() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_handle_webhook()
            .once()
            .withf(|gateway, payload| {
                gateway == "paypal"
                    && payload.get("event_type") == Some(&json!("PAYMENT.CAPTURE.COMPLETED"))
            })
            .return_once(|_, _| Ok(()));

        let mut res = TestClient::post("http://example.com/webhook/paypal")
            .json(&json!({
                "event_type": "PAYMENT.CAPTURE.COMPLETED",
                "resource": {
                    "supplementary_data": { "related_ids": { "order_id": "5O190127TN364715T" } }
                }
            }))
            .send(&make_service(payments))
            .await;

        let body: WebhookResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "success");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_gateway_returns_error_status() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_handle_webhook()
            .once()
            .return_once(|_, _| Err(PaymentsServiceError::GatewayUnavailable));

        let mut res = TestClient::post("http://example.com/webhook/stripe")
            .json(&json!({ "type": "charge.succeeded" }))
            .send(&make_service(payments))
            .await;

        let body: WebhookResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            body,
            WebhookResponse {
                status: "error".to_string(),
                message: Some("Payment gateway is not available".to_string()),
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_payload_without_order_id_returns_400() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_handle_webhook()
            .once()
            .return_once(|_, _| Err(PaymentsServiceError::InvalidData));

        let res = TestClient::post("http://example.com/webhook/paypal")
            .json(&json!({ "event_type": "PAYMENT.CAPTURE.COMPLETED" }))
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
