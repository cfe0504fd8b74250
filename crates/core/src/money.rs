//! Money presentation
//!
//! Amounts travel through the system as `u64` minor units. This module turns
//! them into [`Money`] values of the configured store currency when they need
//! to be shown to a customer.

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// Errors raised while resolving or formatting store money.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// The configured ISO 4217 code is not known.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The amount does not fit in a signed 64-bit minor unit value.
    #[error("amount is out of range for money formatting")]
    OutOfRange,
}

/// The single currency a store prices its catalog in.
#[derive(Debug, Clone, Copy)]
pub struct StoreCurrency {
    currency: &'static Currency,
}

impl StoreCurrency {
    /// Resolve a store currency from its ISO 4217 alphabetic code.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::UnknownCurrency`] when the code is not an ISO currency.
    pub fn from_code(code: &str) -> Result<Self, MoneyError> {
        iso::find(code.trim())
            .map(|currency| Self { currency })
            .ok_or_else(|| MoneyError::UnknownCurrency(code.to_string()))
    }

    /// ISO 4217 alphabetic code, e.g. `USD`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.currency.iso_alpha_code
    }

    /// Wrap a minor unit amount as [`Money`].
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::OutOfRange`] when the amount exceeds `i64::MAX`.
    pub fn money(&self, minor: u64) -> Result<Money<'static, Currency>, MoneyError> {
        let minor = i64::try_from(minor).map_err(|_overflow| MoneyError::OutOfRange)?;

        Ok(Money::from_minor(minor, self.currency))
    }

    /// Format a minor unit amount for display, e.g. `$20.00`.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::OutOfRange`] when the amount exceeds `i64::MAX`.
    pub fn format(&self, minor: u64) -> Result<String, MoneyError> {
        Ok(self.money(minor)?.to_string())
    }

    /// Plain decimal rendering of a minor unit amount, e.g. `20.00`, as
    /// payment gateways expect it.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::OutOfRange`] when the amount exceeds `i64::MAX`.
    pub fn decimal(&self, minor: u64) -> Result<String, MoneyError> {
        let minor = i64::try_from(minor).map_err(|_overflow| MoneyError::OutOfRange)?;

        Ok(Decimal::new(minor, self.currency.exponent).to_string())
    }
}

impl Default for StoreCurrency {
    fn default() -> Self {
        Self {
            currency: iso::USD,
        }
    }
}
