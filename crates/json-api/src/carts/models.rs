//! Cart request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::{
    data::NewCartItem,
    records::{AppliedCouponRecord, CartItemRecord, CartItemUuid, CartRecord},
};

use crate::coupons::models::kind_value;

/// Add Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddItemRequest {
    pub product_uuid: Uuid,
    #[serde(default)]
    pub variant_uuid: Option<Uuid>,
    /// Defaults to one
    #[serde(default = "one")]
    pub quantity: u32,
}

const fn one() -> u32 {
    1
}

impl From<AddItemRequest> for NewCartItem {
    fn from(request: AddItemRequest) -> Self {
        NewCartItem {
            uuid: CartItemUuid::new(),
            product_uuid: request.product_uuid.into(),
            variant_uuid: request.variant_uuid.map(Into::into),
            quantity: request.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub variant_uuid: Option<Uuid>,
    pub title: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,
    /// Unit price in minor units
    pub price: u64,
    /// `price × quantity`
    pub amount: u64,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            variant_uuid: item.variant_uuid.map(Into::into),
            title: item.title,
            size: item.size,
            color: item.color,
            quantity: item.quantity,
            price: item.price,
            amount: item.amount,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppliedCouponResponse {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub discount: u64,
}

impl From<AppliedCouponRecord> for AppliedCouponResponse {
    fn from(coupon: AppliedCouponRecord) -> Self {
        Self {
            code: coupon.code,
            kind: coupon.kind.as_str().to_string(),
            value: kind_value(coupon.kind),
            discount: coupon.discount,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub items: Vec<CartItemResponse>,
    pub sub_total: u64,
    pub discount: u64,
    pub total: u64,
    pub quantity: u64,
    pub coupon: Option<AppliedCouponResponse>,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        Self {
            items: cart.items.into_iter().map(Into::into).collect(),
            sub_total: cart.totals.subtotal,
            discount: cart.totals.discount,
            total: cart.totals.total,
            quantity: cart.totals.quantity,
            coupon: cart.coupon.map(Into::into),
        }
    }
}
