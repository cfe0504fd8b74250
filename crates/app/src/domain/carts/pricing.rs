//! Cart totals and coupon application.
//!
//! Every view of a cart's money (the cart itself, checkout and payment)
//! goes through these two functions.

use jiff::Timestamp;
use storefront::{coupons::CouponError, pricing::PricingError, totals::CartTotals};

use crate::domain::{
    carts::records::{AppliedCouponRecord, CartItemRecord},
    coupons::records::CouponRecord,
};

/// Subtotal, quantity and unit price sum of a set of lines.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] when the sums do not fit.
pub fn line_totals(items: &[CartItemRecord]) -> Result<CartTotals, PricingError> {
    CartTotals::from_lines(items.iter().map(CartItemRecord::line_amount))
}

/// Evaluate `coupon` against `totals` and apply its discount.
///
/// # Errors
///
/// Returns the coupon's rejection when it cannot be used.
pub fn apply_coupon(
    totals: CartTotals,
    coupon: &CouponRecord,
    now: Timestamp,
) -> Result<(CartTotals, AppliedCouponRecord), CouponError> {
    let discount = coupon.rule().evaluate(&totals, now)?;
    let totals = totals.with_discount(discount);

    Ok((totals, AppliedCouponRecord::new(coupon, totals.discount)))
}
