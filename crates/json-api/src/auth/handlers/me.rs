//! Current Customer Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    auth::{errors::into_status_error, models::CustomerResponse},
    extensions::*,
    state::State,
};

/// Current Customer Handler
#[endpoint(tags("auth"), summary = "Current Customer", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_401()?;

    let record = state
        .app
        .auth
        .current_customer(customer.customer_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(record.into()))
}
