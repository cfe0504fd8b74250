//! Coupon request and response bodies.

use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront::coupons::{CouponKind, CouponStatus};
use storefront_app::domain::coupons::{
    data::NewCoupon,
    records::{CouponRecord, CouponUuid},
};

use crate::extensions::*;

/// Create Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCouponRequest {
    /// Stored upper-cased
    pub code: String,

    /// `fixed` or `percent`
    #[serde(rename = "type")]
    pub kind: String,

    /// Minor units for `fixed`, a percentage in `(0, 100]` for `percent`
    pub value: String,

    /// `active` (default) or `inactive`
    #[serde(default)]
    pub status: Option<String>,

    /// RFC 3339 timestamp
    #[serde(default)]
    pub expires_at: Option<String>,

    #[serde(default)]
    pub usage_limit: Option<u32>,

    /// Minimum cart subtotal in minor units
    #[serde(default)]
    pub minimum_amount: u64,
}

impl TryFrom<CreateCouponRequest> for NewCoupon {
    type Error = StatusError;

    fn try_from(request: CreateCouponRequest) -> Result<Self, Self::Error> {
        let value = request.value.trim();

        let kind = match request.kind.as_str() {
            "fixed" => CouponKind::Fixed {
                amount: value
                    .parse::<u64>()
                    .or_400("fixed coupon value must be an amount in minor units")?,
            },
            "percent" => CouponKind::Percent {
                percentage: Decimal::from_str(value)
                    .or_400("percent coupon value must be a decimal")?,
            },
            _ => return Err(StatusError::bad_request().brief("type must be fixed or percent")),
        };

        let status = request
            .status
            .as_deref()
            .map(CouponStatus::from_str)
            .transpose()
            .or_400("status must be active or inactive")?
            .unwrap_or(CouponStatus::Active);

        let expires_at = request
            .expires_at
            .as_deref()
            .map(str::parse::<Timestamp>)
            .transpose()
            .or_400("expires_at must be an RFC 3339 timestamp")?;

        Ok(NewCoupon {
            uuid: CouponUuid::new(),
            code: request.code,
            kind,
            status,
            expires_at,
            usage_limit: request.usage_limit,
            minimum_amount: request.minimum_amount,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponResponse {
    pub uuid: Uuid,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub status: String,
    pub expires_at: Option<String>,
    pub usage_limit: Option<u32>,
    pub usage_count: u32,
    pub minimum_amount: u64,
    pub created_at: String,
}

impl From<CouponRecord> for CouponResponse {
    fn from(coupon: CouponRecord) -> Self {
        Self {
            uuid: coupon.uuid.into(),
            code: coupon.code,
            kind: coupon.kind.as_str().to_string(),
            value: kind_value(coupon.kind),
            status: coupon.status.to_string(),
            expires_at: coupon.expires_at.map(|at| at.to_string()),
            usage_limit: coupon.usage_limit,
            usage_count: coupon.usage_count,
            minimum_amount: coupon.minimum_amount,
            created_at: coupon.created_at.to_string(),
        }
    }
}

pub(crate) fn kind_value(kind: CouponKind) -> String {
    match kind {
        CouponKind::Fixed { amount } => amount.to_string(),
        CouponKind::Percent { percentage } => percentage.normalize().to_string(),
    }
}
