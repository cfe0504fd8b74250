//! Coupon Records

use jiff::Timestamp;
use storefront::coupons::{CouponKind, CouponRule, CouponStatus};

use crate::uuids::TypedUuid;

/// Coupon UUID
pub type CouponUuid = TypedUuid<CouponRecord>;

/// Coupon Record
#[derive(Debug, Clone)]
pub struct CouponRecord {
    pub uuid: CouponUuid,
    pub code: String,
    pub kind: CouponKind,
    pub status: CouponStatus,
    pub expires_at: Option<Timestamp>,
    pub usage_limit: Option<u32>,
    pub usage_count: u32,
    pub minimum_amount: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CouponRecord {
    /// The evaluation rule this coupon represents.
    #[must_use]
    pub fn rule(&self) -> CouponRule {
        CouponRule {
            kind: self.kind,
            status: self.status,
            expires_at: self.expires_at,
            usage_limit: self.usage_limit,
            usage_count: self.usage_count,
            minimum_amount: self.minimum_amount,
        }
    }
}
