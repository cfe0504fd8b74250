//! Order Records

use jiff::Timestamp;
use storefront::orders::{OrderStatus, PaymentStatus, awaiting_payment};

use crate::{
    domain::{carts::records::CartItemRecord, customers::records::CustomerUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Where an order ships to and who to contact about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub post_code: Option<String>,
    pub address1: String,
    pub address2: Option<String>,
}

/// A placed order. `items` are the cart lines it closed.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub customer_uuid: CustomerUuid,
    pub sub_total: u64,
    pub discount: u64,
    pub total_amount: u64,
    pub quantity: u32,
    pub coupon_code: Option<String>,
    pub status: OrderStatus,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub payment_reference: Option<String>,
    pub payment_proof: Option<String>,
    pub address: ShippingAddress,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    /// `new` and still unpaid.
    #[must_use]
    pub fn awaiting_payment(&self) -> bool {
        awaiting_payment(self.status, self.payment_status)
    }
}
