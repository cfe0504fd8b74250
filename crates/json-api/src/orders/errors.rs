//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

use crate::coupons::errors::coupon_rejection;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::StockNotSufficient { title } => {
            StatusError::bad_request().brief(format!("Stock not sufficient for {title}"))
        }
        OrdersServiceError::UnknownPaymentMethod => {
            StatusError::bad_request().brief("Payment method is not available")
        }
        OrdersServiceError::Coupon(source) => coupon_rejection(source),
        OrdersServiceError::InvalidTransition { from, to } => {
            StatusError::bad_request().brief(format!("Order cannot move from {from} to {to}"))
        }
        OrdersServiceError::NotCancellable => {
            StatusError::bad_request().brief("Order can no longer be cancelled")
        }
        OrdersServiceError::CartChanged => {
            StatusError::conflict().brief("Cart changed during checkout, please retry")
        }
        OrdersServiceError::InvalidEmail => {
            StatusError::bad_request().brief("Invalid email address")
        }
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid checkout payload")
        }
        OrdersServiceError::OrderNumberExhausted => {
            error!("exhausted order number attempts");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Pricing(source) => {
            error!("order pricing error: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
