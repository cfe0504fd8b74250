//! Create Variant Handler

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

use storefront_app::domain::products::{data::NewVariant, records::VariantUuid};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::VariantResponse},
    state::State,
};

/// Create Variant Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateVariantRequest {
    pub size: Option<String>,
    pub color: Option<String>,
    /// Overrides the product price when set
    pub price: Option<u64>,
    pub stock: u32,
}

impl From<CreateVariantRequest> for NewVariant {
    fn from(request: CreateVariantRequest) -> Self {
        NewVariant {
            uuid: VariantUuid::new(),
            size: request.size,
            color: request.color,
            price: request.price,
            stock: request.stock,
        }
    }
}

/// Create Variant Handler
#[endpoint(
    tags("products"),
    summary = "Create Variant",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Variant created"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<CreateVariantRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VariantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let variant = state
        .app
        .products
        .create_variant(product.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(variant.into()))
}
