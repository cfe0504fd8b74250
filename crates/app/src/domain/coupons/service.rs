//! Coupons service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::coupons::{
        data::NewCoupon,
        errors::CouponsServiceError,
        records::{CouponRecord, CouponUuid},
        repository::PgCouponsRepository,
    },
    pagination::{Page, Paginated},
};

#[derive(Debug, Clone)]
pub struct PgCouponsService {
    db: Db,
    repository: PgCouponsRepository,
}

impl PgCouponsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCouponsRepository::new(),
        }
    }
}

#[async_trait]
impl CouponsService for PgCouponsService {
    async fn list_coupons(
        &self,
        page: Page,
    ) -> Result<Paginated<CouponRecord>, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let coupons = self.repository.list_coupons(&mut tx, page).await?;
        let total = self.repository.count_coupons(&mut tx).await?;

        tx.commit().await?;

        Ok(Paginated {
            items: coupons,
            total: u64::try_from(total).unwrap_or_default(),
            page,
        })
    }

    #[tracing::instrument(
        name = "coupons.service.create_coupon",
        skip(self, coupon),
        fields(coupon_uuid = %coupon.uuid, kind = coupon.kind.as_str()),
        err
    )]
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError> {
        let coupon = coupon.validated()?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_coupon(&mut tx, &coupon).await?;

        tx.commit().await?;

        info!(code = %created.code, "coupon created");

        Ok(created)
    }

    #[tracing::instrument(
        name = "coupons.service.delete_coupon",
        skip(self),
        fields(coupon_uuid = %coupon),
        err
    )]
    async fn delete_coupon(&self, coupon: CouponUuid) -> Result<(), CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_coupon(&mut tx, coupon).await?;

        if rows_affected == 0 {
            return Err(CouponsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Retrieve a page of coupons, newest first.
    async fn list_coupons(
        &self,
        page: Page,
    ) -> Result<Paginated<CouponRecord>, CouponsServiceError>;

    /// Create a coupon; the code is normalised to upper case.
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError>;

    /// Delete a coupon, detaching it from any carts it is applied to.
    async fn delete_coupon(&self, coupon: CouponUuid) -> Result<(), CouponsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use storefront::coupons::{CouponError, CouponKind};
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::percent_coupon};

    use super::*;

    #[tokio::test]
    async fn create_coupon_uppercases_code() -> TestResult {
        let ctx = TestContext::new().await;

        let coupon = ctx
            .coupons
            .create_coupon(percent_coupon(" save10 ", dec!(10), 0))
            .await?;

        assert_eq!(coupon.code, "SAVE10");
        assert_eq!(coupon.usage_count, 0);
        assert_eq!(
            coupon.kind,
            CouponKind::Percent {
                percentage: dec!(10)
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn percentage_over_hundred_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .coupons
            .create_coupon(percent_coupon("TOO-MUCH", dec!(150), 0))
            .await;

        assert!(
            matches!(
                result,
                Err(CouponsServiceError::Invalid(CouponError::InvalidPercentage))
            ),
            "expected InvalidPercentage, got {result:?}"
        );
    }

    #[tokio::test]
    async fn duplicate_code_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.coupons
            .create_coupon(percent_coupon("SAVE10", dec!(10), 0))
            .await?;

        let result = ctx
            .coupons
            .create_coupon(percent_coupon("save10", dec!(5), 0))
            .await;

        assert!(
            matches!(result, Err(CouponsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_coupon_removes_it() -> TestResult {
        let ctx = TestContext::new().await;

        let coupon = ctx
            .coupons
            .create_coupon(percent_coupon("SAVE10", dec!(10), 0))
            .await?;

        ctx.coupons.delete_coupon(coupon.uuid).await?;

        let listed = ctx.coupons.list_coupons(Page::default()).await?;

        assert_eq!(listed.total, 0);

        let result = ctx.coupons.delete_coupon(coupon.uuid).await;

        assert!(
            matches!(result, Err(CouponsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
