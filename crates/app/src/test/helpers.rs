//! Test Helpers

use rust_decimal::Decimal;
use storefront::coupons::{CouponKind, CouponStatus};

use crate::domain::{
    coupons::{data::NewCoupon, records::CouponUuid},
    orders::{
        data::NewOrder,
        records::{OrderUuid, ShippingAddress},
    },
    products::{data::NewProduct, records::ProductUuid},
};

/// Lowercase, hyphen-separated slug of a title: "Canvas Tote" → "canvas-tote".
pub(crate) fn slug(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

pub(crate) fn new_product(title: &str, price: u64, stock: u32) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        title: title.to_string(),
        slug: slug(title),
        price,
        discount: Decimal::ZERO,
        stock,
        photos: Vec::new(),
    }
}

pub(crate) fn percent_coupon(code: &str, percentage: Decimal, minimum_amount: u64) -> NewCoupon {
    NewCoupon {
        uuid: CouponUuid::new(),
        code: code.to_string(),
        kind: CouponKind::Percent { percentage },
        status: CouponStatus::Active,
        expires_at: None,
        usage_limit: None,
        minimum_amount,
    }
}

pub(crate) fn checkout(payment_method: &str) -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        payment_method: payment_method.to_string(),
        address: ShippingAddress {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+44 20 7946 0000".to_string(),
            country: "GB".to_string(),
            post_code: Some("SW1Y 4LE".to_string()),
            address1: "12 St James's Square".to_string(),
            address2: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_joins_words_with_hyphens() {
        assert_eq!(slug("Canvas Tote"), "canvas-tote");
        assert_eq!(slug("  Product  A! "), "product-a");
    }
}
