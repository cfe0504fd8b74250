//! Order Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    pagination::{PageMeta, page_from_query},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
    pub meta: PageMeta,
}

/// Order Index Handler
///
/// Lists the signed-in customer's orders, newest first.
#[endpoint(tags("orders"), summary = "List Orders", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    per_page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(customer.customer_uuid, page_from_query(page, per_page))
        .await
        .map_err(into_status_error)?;

    let meta = PageMeta::from(&orders);

    Ok(Json(OrdersResponse {
        orders: orders.items.into_iter().map(Into::into).collect(),
        meta,
    }))
}
