//! PayPal Return Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use storefront_app::domain::orders::records::OrderUuid;

use crate::{
    extensions::*,
    payments::{errors::failed_outcome, redirect::see_other},
    state::State,
};

/// PayPal Return Handler
///
/// PayPal sends the customer here after approval with the PayPal order id
/// as `token`. The approved order is captured before redirecting.
#[endpoint(
    tags("payments"),
    summary = "PayPal Return",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::SEE_OTHER, description = "Redirect to the success or cancel page"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    token: QueryParam<String, true>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;
    let order = OrderUuid::from(order.into_inner());

    let outcome = state
        .app
        .payments
        .complete_paypal(customer.customer_uuid, order, &token.into_inner())
        .await
        .unwrap_or_else(|error| failed_outcome(error, customer.customer_uuid, order));

    see_other(res, &state.redirects, "paypal_return", &outcome)
}
