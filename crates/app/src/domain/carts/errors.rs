//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use storefront::{coupons::CouponError, pricing::PricingError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart item already exists")]
    AlreadyExists,

    #[error("cart item not found")]
    NotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("cart is empty")]
    EmptyCart,

    #[error("stock not sufficient")]
    StockNotSufficient { available: i64, requested: u64 },

    #[error("quantity must be at least one")]
    InvalidQuantity,

    #[error(transparent)]
    Coupon(#[from] CouponError),

    #[error("price calculation failed")]
    Pricing(#[source] PricingError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<PricingError> for CartsServiceError {
    fn from(error: PricingError) -> Self {
        match error {
            PricingError::StockNotSufficient {
                available,
                requested,
            } => Self::StockNotSufficient {
                available,
                requested,
            },
            PricingError::InvalidQuantity => Self::InvalidQuantity,
            PricingError::InvalidPercentage | PricingError::Overflow => Self::Pricing(error),
        }
    }
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
