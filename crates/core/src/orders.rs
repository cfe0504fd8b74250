//! Order lifecycle
//!
//! Fulfilment moves `new → process → delivered`; an order can be cancelled
//! while it is `new` or `process`. Customers may only cancel orders that are
//! still `new` and unpaid.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Prefix every order number starts with.
pub const ORDER_NUMBER_PREFIX: &str = "ORD-";

/// Number of random characters following [`ORDER_NUMBER_PREFIX`].
pub const ORDER_NUMBER_LENGTH: usize = 10;

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    New,
    Process,
    Delivered,
    Cancel,
}

impl OrderStatus {
    /// Name persisted for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Process => "process",
            Self::Delivered => "delivered",
            Self::Cancel => "cancel",
        }
    }

    /// Whether an order may move from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::New, Self::Process)
                | (Self::Process, Self::Delivered)
                | (Self::New | Self::Process, Self::Cancel)
        )
    }

    /// Whether moving to `self` puts reserved stock back.
    #[must_use]
    pub const fn releases_stock(self) -> bool {
        matches!(self, Self::Cancel)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status string that is not one of the known values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "new" => Ok(Self::New),
            "process" => Ok(Self::Process),
            "delivered" => Ok(Self::Delivered),
            "cancel" => Ok(Self::Cancel),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Whether an order has been paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "unpaid" => Ok(Self::Unpaid),
            "paid" => Ok(Self::Paid),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Whether an order is still waiting on a payment: `new` and `unpaid`.
#[must_use]
pub fn awaiting_payment(status: OrderStatus, payment_status: PaymentStatus) -> bool {
    status == OrderStatus::New && payment_status == PaymentStatus::Unpaid
}

/// Build an order number from random alphanumeric characters.
///
/// Characters outside `[A-Za-z0-9]` are skipped and letters are
/// upper-cased; at most [`ORDER_NUMBER_LENGTH`] are used.
#[must_use]
pub fn order_number<I>(random: I) -> String
where
    I: IntoIterator<Item = char>,
{
    let suffix: String = random
        .into_iter()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .take(ORDER_NUMBER_LENGTH)
        .collect();

    format!("{ORDER_NUMBER_PREFIX}{suffix}")
}
