//! Coupons
//!
//! A coupon is evaluated against a cart in a fixed order: it must be active
//! and unexpired, the cart's unit prices must reach its minimum and its usage
//! limit must not be exhausted. Only then is a discount calculated from the
//! subtotal. Evaluation is pure; callers decide what to persist.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    pricing::{PricingError, percent_of_minor},
    totals::CartTotals,
};

/// Longest accepted coupon code.
pub const MAX_CODE_LENGTH: usize = 50;

/// Why a coupon could not be created or applied.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CouponError {
    /// No active coupon carries the code.
    #[error("coupon is invalid or inactive")]
    InvalidOrInactive,

    /// The coupon's expiry has passed.
    #[error("coupon has expired")]
    Expired,

    /// The cart subtotal is below the coupon's minimum.
    #[error("cart subtotal is below the coupon minimum of {minimum}")]
    MinimumNotMet {
        /// Minimum subtotal in minor units.
        minimum: u64,
    },

    /// Every permitted use has been consumed.
    #[error("coupon usage limit reached")]
    LimitReached,

    /// Code is empty, too long or contains unsupported characters.
    #[error("coupon code is malformed")]
    MalformedCode,

    /// Fixed coupons must take something off.
    #[error("fixed coupon amount must be greater than zero")]
    InvalidAmount,

    /// Percent coupons must be in `(0, 100]`.
    #[error("percent coupon value must be greater than 0 and at most 100")]
    InvalidPercentage,

    /// Discount arithmetic failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// How a coupon reduces the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponKind {
    /// A flat amount in minor units.
    Fixed {
        /// Amount taken off, in minor units.
        amount: u64,
    },

    /// A percentage of the subtotal.
    Percent {
        /// Percentage in `(0, 100]`.
        percentage: Decimal,
    },
}

impl CouponKind {
    /// Stable name persisted alongside the coupon.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed { .. } => "fixed",
            Self::Percent { .. } => "percent",
        }
    }

    /// Validate the configured value.
    ///
    /// # Errors
    ///
    /// - [`CouponError::InvalidAmount`] for a zero fixed amount.
    /// - [`CouponError::InvalidPercentage`] for a percentage outside `(0, 100]`.
    pub fn validate(&self) -> Result<(), CouponError> {
        match self {
            Self::Fixed { amount } if *amount == 0 => Err(CouponError::InvalidAmount),
            Self::Percent { percentage }
                if *percentage <= Decimal::ZERO || *percentage > Decimal::ONE_HUNDRED =>
            {
                Err(CouponError::InvalidPercentage)
            }
            Self::Fixed { .. } | Self::Percent { .. } => Ok(()),
        }
    }

    /// Discount for a subtotal. Never exceeds the subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::Pricing`] when the percentage cannot be applied.
    pub fn discount_for(&self, subtotal: u64) -> Result<u64, CouponError> {
        match self {
            Self::Fixed { amount } => Ok((*amount).min(subtotal)),
            Self::Percent { percentage } => Ok(percent_of_minor(*percentage, subtotal)?),
        }
    }
}

/// Whether a coupon can currently be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponStatus {
    Active,
    Inactive,
}

impl CouponStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for CouponStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown coupon status string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown coupon status: {0}")]
pub struct UnknownCouponStatus(pub String);

impl FromStr for CouponStatus {
    type Err = UnknownCouponStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(UnknownCouponStatus(other.to_string())),
        }
    }
}

/// The parts of a coupon that decide whether and how much it discounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponRule {
    pub kind: CouponKind,
    pub status: CouponStatus,
    pub expires_at: Option<Timestamp>,
    pub usage_limit: Option<u32>,
    pub usage_count: u32,
    pub minimum_amount: u64,
}

impl CouponRule {
    /// Evaluate the rule against a cart at `now`, returning the discount.
    ///
    /// The minimum is compared with the sum of the lines' unit prices; the
    /// discount is taken from the subtotal of line amounts.
    ///
    /// # Errors
    ///
    /// Returns the first failed check, in order: inactive, expired, minimum
    /// not met, usage limit reached.
    pub fn evaluate(&self, cart: &CartTotals, now: Timestamp) -> Result<u64, CouponError> {
        if self.status != CouponStatus::Active {
            return Err(CouponError::InvalidOrInactive);
        }

        if self.expires_at.is_some_and(|expires_at| expires_at <= now) {
            return Err(CouponError::Expired);
        }

        if cart.unit_prices < self.minimum_amount {
            return Err(CouponError::MinimumNotMet {
                minimum: self.minimum_amount,
            });
        }

        if self.is_exhausted() {
            return Err(CouponError::LimitReached);
        }

        self.kind.discount_for(cart.subtotal)
    }

    /// Whether the usage limit has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.usage_limit
            .is_some_and(|limit| self.usage_count >= limit)
    }
}

/// Normalise a customer-entered or admin-entered coupon code.
///
/// Codes are trimmed and upper-cased; they may contain ASCII letters, digits,
/// `-` and `_`.
///
/// # Errors
///
/// Returns [`CouponError::MalformedCode`] for empty, overlong or otherwise
/// invalid codes.
pub fn normalize_code(code: &str) -> Result<String, CouponError> {
    let code = code.trim().to_ascii_uppercase();

    let valid = !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if !valid {
        return Err(CouponError::MalformedCode);
    }

    Ok(code)
}
