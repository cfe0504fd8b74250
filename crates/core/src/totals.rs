//! Cart totals
//!
//! The single place a discounted total is derived. Cart views, checkout and
//! payment preparation all read from a [`CartTotals`] rather than recomputing.

use crate::pricing::PricingError;

/// One priced line as it contributes to totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineAmount {
    pub quantity: u32,
    pub price: u64,
    pub amount: u64,
}

/// Subtotal, discount and payable total of a set of cart lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of line amounts.
    pub subtotal: u64,

    /// Discount taken off the subtotal, never more than the subtotal.
    pub discount: u64,

    /// `subtotal - discount`.
    pub total: u64,

    /// Sum of line quantities.
    pub quantity: u64,

    /// Sum of line unit prices, ignoring quantities. A coupon's minimum is
    /// checked against this.
    pub unit_prices: u64,
}

impl CartTotals {
    /// Sum a set of lines with no discount applied.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] when the sums do not fit in `u64`.
    pub fn from_lines<I>(lines: I) -> Result<Self, PricingError>
    where
        I: IntoIterator<Item = LineAmount>,
    {
        let (subtotal, quantity, unit_prices) = lines
            .into_iter()
            .try_fold(
                (0_u64, 0_u64, 0_u64),
                |(subtotal, quantity, unit_prices), line| {
                    Some((
                        subtotal.checked_add(line.amount)?,
                        quantity.checked_add(u64::from(line.quantity))?,
                        unit_prices.checked_add(line.price)?,
                    ))
                },
            )
            .ok_or(PricingError::Overflow)?;

        Ok(Self {
            subtotal,
            discount: 0,
            total: subtotal,
            quantity,
            unit_prices,
        })
    }

    /// Apply a discount, clamped to the subtotal.
    #[must_use]
    pub fn with_discount(self, discount: u64) -> Self {
        let discount = discount.min(self.subtotal);

        Self {
            discount,
            total: self.subtotal - discount,
            ..self
        }
    }

    /// Whether there is nothing in the cart.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}
