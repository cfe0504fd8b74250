//! Order request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::{
    data::NewOrder,
    records::{OrderRecord, OrderUuid, ShippingAddress},
};

use crate::carts::models::CartItemResponse;

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    /// Gateway slug, e.g. `cod` or `paypal`
    pub payment_method: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    #[serde(default)]
    pub post_code: Option<String>,
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
}

impl From<CheckoutRequest> for NewOrder {
    fn from(request: CheckoutRequest) -> Self {
        NewOrder {
            uuid: OrderUuid::new(),
            payment_method: request.payment_method,
            address: ShippingAddress {
                first_name: request.first_name,
                last_name: request.last_name,
                email: request.email,
                phone: request.phone,
                country: request.country,
                post_code: request.post_code,
                address1: request.address1,
                address2: request.address2,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub post_code: Option<String>,
    pub address1: String,
    pub address2: Option<String>,
}

impl From<ShippingAddress> for AddressResponse {
    fn from(address: ShippingAddress) -> Self {
        Self {
            first_name: address.first_name,
            last_name: address.last_name,
            email: address.email,
            phone: address.phone,
            country: address.country,
            post_code: address.post_code,
            address1: address.address1,
            address2: address.address2,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub order_number: String,
    pub sub_total: u64,
    pub discount: u64,
    pub total_amount: u64,
    pub quantity: u32,
    pub coupon_code: Option<String>,

    /// `new`, `process`, `delivered` or `cancel`
    pub status: String,

    pub payment_method: String,

    /// `unpaid` or `paid`
    pub payment_status: String,

    pub payment_proof: Option<String>,
    pub address: AddressResponse,

    /// Empty in listings
    pub items: Vec<CartItemResponse>,

    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into(),
            order_number: order.order_number,
            sub_total: order.sub_total,
            discount: order.discount,
            total_amount: order.total_amount,
            quantity: order.quantity,
            coupon_code: order.coupon_code,
            status: order.status.to_string(),
            payment_method: order.payment_method,
            payment_status: order.payment_status.to_string(),
            payment_proof: order.payment_proof,
            address: order.address.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}
