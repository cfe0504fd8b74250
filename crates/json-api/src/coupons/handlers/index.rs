//! Coupon Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    coupons::{errors::into_status_error, models::CouponResponse},
    extensions::*,
    pagination::{PageMeta, page_from_query},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponsResponse {
    pub coupons: Vec<CouponResponse>,
    pub meta: PageMeta,
}

/// Coupon Index Handler
#[endpoint(tags("coupons"), summary = "List Coupons", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    per_page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<CouponsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupons = state
        .app
        .coupons
        .list_coupons(page_from_query(page, per_page))
        .await
        .map_err(into_status_error)?;

    let meta = PageMeta::from(&coupons);

    Ok(Json(CouponsResponse {
        coupons: coupons.items.into_iter().map(Into::into).collect(),
        meta,
    }))
}
