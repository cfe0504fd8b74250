//! Pay Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::OrderUuid;

use crate::{
    extensions::*,
    payments::{errors::failed_outcome, redirect::see_other},
    state::State,
};

/// Pay Order Request
///
/// Send `{}` when the gateway needs no proof.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayOrderRequest {
    /// Transfer reference or receipt for offline gateways
    #[serde(default)]
    pub proof: Option<String>,
}

/// Pay Order Handler
///
/// Dispatches payment to the order's gateway and redirects the browser to
/// the gateway, the success page or the cancel page.
#[endpoint(
    tags("payments"),
    summary = "Pay Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::SEE_OTHER, description = "Redirect to the next payment step"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<PayOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;
    let order = OrderUuid::from(order.into_inner());

    let outcome = state
        .app
        .payments
        .pay_order(customer.customer_uuid, order, json.into_inner().proof)
        .await
        .unwrap_or_else(|error| failed_outcome(error, customer.customer_uuid, order));

    see_other(res, &state.redirects, "dispatch", &outcome)
}
