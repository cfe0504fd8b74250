//! Coupon Data

use jiff::Timestamp;
use storefront::coupons::{CouponKind, CouponStatus, normalize_code};

use crate::domain::coupons::{errors::CouponsServiceError, records::CouponUuid};

/// New Coupon Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCoupon {
    pub uuid: CouponUuid,
    pub code: String,
    pub kind: CouponKind,
    pub status: CouponStatus,
    pub expires_at: Option<Timestamp>,
    pub usage_limit: Option<u32>,
    pub minimum_amount: u64,
}

impl NewCoupon {
    /// Normalise the code and validate the discount value.
    ///
    /// # Errors
    ///
    /// Returns [`CouponsServiceError::Invalid`] for a malformed code or value.
    pub fn validated(self) -> Result<Self, CouponsServiceError> {
        let code = normalize_code(&self.code)?;

        self.kind.validate()?;

        Ok(Self { code, ..self })
    }
}
