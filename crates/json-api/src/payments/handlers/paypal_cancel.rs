//! PayPal Cancel Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::domain::orders::records::OrderUuid;

use crate::{
    extensions::*,
    payments::{errors::failed_outcome, redirect::see_other},
    state::State,
};

/// PayPal Cancel Handler
///
/// The customer backed out of PayPal. The order stays unpaid and can be
/// paid again.
#[endpoint(
    tags("payments"),
    summary = "PayPal Cancel",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::SEE_OTHER, description = "Redirect to the cancel page"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;
    let order = OrderUuid::from(order.into_inner());

    let outcome = state
        .app
        .payments
        .cancel_paypal(customer.customer_uuid, order)
        .await
        .unwrap_or_else(|error| failed_outcome(error, customer.customer_uuid, order));

    see_other(res, &state.redirects, "paypal_cancel", &outcome)
}
