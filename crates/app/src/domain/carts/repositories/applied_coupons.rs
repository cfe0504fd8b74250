//! Applied Coupons Repository

use sqlx::{Postgres, Transaction, query, query_as};

use crate::domain::{
    coupons::records::{CouponRecord, CouponUuid},
    customers::records::CustomerUuid,
};

const GET_APPLIED_COUPON_SQL: &str = include_str!("../sql/get_applied_coupon.sql");
const SET_APPLIED_COUPON_SQL: &str = include_str!("../sql/set_applied_coupon.sql");
const CLEAR_APPLIED_COUPON_SQL: &str = include_str!("../sql/clear_applied_coupon.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAppliedCouponsRepository;

impl PgAppliedCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_applied_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Option<CouponRecord>, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(GET_APPLIED_COUPON_SQL)
            .bind(customer.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn set_applied_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        coupon: CouponUuid,
    ) -> Result<(), sqlx::Error> {
        query(SET_APPLIED_COUPON_SQL)
            .bind(customer.into_uuid())
            .bind(coupon.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn clear_applied_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_APPLIED_COUPON_SQL)
            .bind(customer.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
