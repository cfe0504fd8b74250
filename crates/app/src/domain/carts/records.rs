//! Cart Records

use jiff::Timestamp;
use storefront::{coupons::CouponKind, totals::{CartTotals, LineAmount}};

use crate::{
    domain::{
        coupons::records::{CouponRecord, CouponUuid},
        customers::records::CustomerUuid,
        products::records::{ProductUuid, VariantUuid},
    },
    uuids::TypedUuid,
};

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// A cart line, open until it is attached to an order.
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<VariantUuid>,
    pub title: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,
    pub price: u64,
    pub amount: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItemRecord {
    #[must_use]
    pub fn line_amount(&self) -> LineAmount {
        LineAmount {
            quantity: self.quantity,
            price: self.price,
            amount: self.amount,
        }
    }
}

/// A coupon applied to a cart, with the discount it currently yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedCouponRecord {
    pub uuid: CouponUuid,
    pub code: String,
    pub kind: CouponKind,
    pub discount: u64,
}

impl AppliedCouponRecord {
    #[must_use]
    pub fn new(coupon: &CouponRecord, discount: u64) -> Self {
        Self {
            uuid: coupon.uuid,
            code: coupon.code.clone(),
            kind: coupon.kind,
            discount,
        }
    }
}

/// A customer's open cart.
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub customer_uuid: CustomerUuid,
    pub items: Vec<CartItemRecord>,
    pub totals: CartTotals,
    pub coupon: Option<AppliedCouponRecord>,
}
