//! Coupon Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use storefront::coupons::{CouponKind, CouponStatus};

    use storefront_app::domain::coupons::records::{CouponRecord, CouponUuid};

    pub(super) fn make_coupon(uuid: CouponUuid, code: &str) -> CouponRecord {
        CouponRecord {
            uuid,
            code: code.to_string(),
            kind: CouponKind::Percent {
                percentage: Decimal::TEN,
            },
            status: CouponStatus::Active,
            expires_at: None,
            usage_limit: None,
            usage_count: 0,
            minimum_amount: 50_00,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
