//! Cart line pricing
//!
//! Resolves the unit price a cart line is charged at, validates that the
//! requested quantity is in stock and derives the line amount. Line amounts
//! are always recomputed as `unit price × quantity`; they are never adjusted
//! incrementally.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

/// Errors raised by line pricing.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PricingError {
    /// Not enough stock to satisfy the requested quantity.
    #[error("stock not sufficient: {available} available, {requested} requested")]
    StockNotSufficient {
        /// Units currently available.
        available: i64,

        /// Units the line would hold.
        requested: u64,
    },

    /// Quantities start at one.
    #[error("quantity must be at least one")]
    InvalidQuantity,

    /// Percentages are bounded to `0..=100`.
    #[error("percentage must be between 0 and 100")]
    InvalidPercentage,

    /// Amount arithmetic overflowed.
    #[error("amount calculation overflowed")]
    Overflow,
}

/// Unit price charged for a product, honouring a selected variant's override.
///
/// The product's listing discount is not applied here; see [`after_discount`].
#[must_use]
pub fn unit_price(product_price: u64, variant_price: Option<u64>) -> u64 {
    variant_price.unwrap_or(product_price)
}

/// Stock that applies to a selection: the variant's when one is selected.
#[must_use]
pub fn available_stock(product_stock: i64, variant_stock: Option<i64>) -> i64 {
    variant_stock.unwrap_or(product_stock)
}

/// Check that `requested` units can be taken from `available`.
///
/// # Errors
///
/// - [`PricingError::InvalidQuantity`] when `requested` is zero.
/// - [`PricingError::StockNotSufficient`] when nothing is in stock or fewer
///   units than requested remain.
pub fn check_stock(available: i64, requested: u64) -> Result<(), PricingError> {
    if requested == 0 {
        return Err(PricingError::InvalidQuantity);
    }

    let enough = i64::try_from(requested).is_ok_and(|requested| available >= requested);

    if available <= 0 || !enough {
        return Err(PricingError::StockNotSufficient {
            available,
            requested,
        });
    }

    Ok(())
}

/// Line amount for `quantity` units at `unit_price`.
///
/// # Errors
///
/// - [`PricingError::InvalidQuantity`] when `quantity` is zero.
/// - [`PricingError::Overflow`] when the product does not fit in `u64`.
pub fn line_amount(unit_price: u64, quantity: u32) -> Result<u64, PricingError> {
    if quantity == 0 {
        return Err(PricingError::InvalidQuantity);
    }

    unit_price
        .checked_mul(u64::from(quantity))
        .ok_or(PricingError::Overflow)
}

/// Calculate `percent`% of a minor unit amount, rounded half away from zero.
///
/// # Errors
///
/// - [`PricingError::InvalidPercentage`] when `percent` is outside `0..=100`.
/// - [`PricingError::Overflow`] when the result cannot be represented.
pub fn percent_of_minor(percent: Decimal, minor: u64) -> Result<u64, PricingError> {
    if percent.is_sign_negative() || percent > Decimal::ONE_HUNDRED {
        return Err(PricingError::InvalidPercentage);
    }

    Decimal::from(minor)
        .checked_mul(percent)
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(PricingError::Overflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(PricingError::Overflow)
}

/// Listing price after a product's percentage discount.
///
/// # Errors
///
/// Returns [`PricingError::InvalidPercentage`] when `discount` is outside `0..=100`.
pub fn after_discount(price: u64, discount: Decimal) -> Result<u64, PricingError> {
    let reduction = percent_of_minor(discount, price)?;

    Ok(price.saturating_sub(reduction))
}
