//! Payment Errors
//!
//! Payment routes are browser redirects, so failures become a failed
//! [`PaymentOutcome`] rather than a status code. Only the webhook answers
//! with JSON.

use salvo::http::StatusCode;
use tracing::error;

use storefront_app::domain::{
    customers::records::CustomerUuid,
    orders::records::OrderUuid,
    payments::{PaymentsServiceError, records::PaymentOutcome},
};

/// Shown when a payment failed for a reason the customer cannot act on.
pub(crate) const GENERIC_FAILURE: &str = "Payment could not be processed, please try again";

/// Turn a failed payment call into the outcome the customer is redirected with.
pub(crate) fn failed_outcome(
    error: PaymentsServiceError,
    customer: CustomerUuid,
    order: OrderUuid,
) -> PaymentOutcome {
    match error {
        PaymentsServiceError::NotFound => {
            PaymentOutcome::failed("Order not found or already processed")
        }
        PaymentsServiceError::GatewayUnavailable => {
            PaymentOutcome::failed("Payment method is not available")
        }
        other => {
            error!(
                customer_uuid = %customer,
                order_uuid = %order,
                "payment failed: {other}"
            );

            PaymentOutcome::failed(GENERIC_FAILURE)
        }
    }
}

/// Status and message for a rejected webhook.
pub(crate) fn webhook_rejection(error: PaymentsServiceError) -> (StatusCode, String) {
    match error {
        PaymentsServiceError::GatewayUnavailable => (
            StatusCode::BAD_REQUEST,
            "Payment gateway is not available".to_string(),
        ),
        PaymentsServiceError::InvalidData | PaymentsServiceError::MissingRequiredData => (
            StatusCode::BAD_REQUEST,
            "Webhook payload is invalid".to_string(),
        ),
        other => {
            error!("webhook processing failed: {other}");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Webhook could not be processed".to_string(),
            )
        }
    }
}
