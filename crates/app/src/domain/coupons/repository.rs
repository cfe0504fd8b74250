//! Coupons Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use storefront::coupons::CouponKind;

use crate::{
    domain::{
        coupons::{
            data::NewCoupon,
            records::{CouponRecord, CouponUuid},
        },
        rows::{amount_param, count_param, try_get_amount, try_get_count, try_get_optional_count},
    },
    pagination::Page,
};

const LIST_COUPONS_SQL: &str = include_str!("sql/list_coupons.sql");
const COUNT_COUPONS_SQL: &str = include_str!("sql/count_coupons.sql");
const CREATE_COUPON_SQL: &str = include_str!("sql/create_coupon.sql");
const DELETE_COUPON_SQL: &str = include_str!("sql/delete_coupon.sql");
const FIND_COUPON_BY_CODE_SQL: &str = include_str!("sql/find_coupon_by_code.sql");
const GET_COUPON_FOR_UPDATE_SQL: &str = include_str!("sql/get_coupon_for_update.sql");
const INCREMENT_COUPON_USAGE_SQL: &str = include_str!("sql/increment_coupon_usage.sql");
const RELEASE_COUPON_USAGE_SQL: &str = include_str!("sql/release_coupon_usage.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCouponsRepository;

impl PgCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: Page,
    ) -> Result<Vec<CouponRecord>, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(LIST_COUPONS_SQL)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_COUPONS_SQL).fetch_one(&mut **tx).await
    }

    pub(crate) async fn create_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: &NewCoupon,
    ) -> Result<CouponRecord, sqlx::Error> {
        let (amount, percentage) = match coupon.kind {
            CouponKind::Fixed { amount } => (Some(amount_param(amount, "amount")?), None),
            CouponKind::Percent { percentage } => (None, Some(percentage)),
        };

        query_as::<Postgres, CouponRecord>(CREATE_COUPON_SQL)
            .bind(coupon.uuid.into_uuid())
            .bind(&coupon.code)
            .bind(coupon.kind.as_str())
            .bind(amount)
            .bind(percentage)
            .bind(coupon.status.as_str())
            .bind(coupon.expires_at.map(SqlxTimestamp::from))
            .bind(
                coupon
                    .usage_limit
                    .map(|limit| count_param(limit, "usage_limit"))
                    .transpose()?,
            )
            .bind(amount_param(coupon.minimum_amount, "minimum_amount")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_COUPON_SQL)
            .bind(coupon.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Active coupon carrying `code`, if any.
    pub(crate) async fn find_active_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<CouponRecord>, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(FIND_COUPON_BY_CODE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Lock a coupon row for the rest of the transaction.
    pub(crate) async fn get_coupon_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
    ) -> Result<Option<CouponRecord>, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(GET_COUPON_FOR_UPDATE_SQL)
            .bind(coupon.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Consume one use. Returns `false` when the usage limit was already reached.
    pub(crate) async fn increment_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(INCREMENT_COUPON_USAGE_SQL)
            .bind(coupon.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }

    /// Give back one use of `code` to the coupon that existed at `placed_at`.
    pub(crate) async fn release_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
        placed_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(RELEASE_COUPON_USAGE_SQL)
            .bind(code)
            .bind(SqlxTimestamp::from(placed_at))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }
}

impl<'r> FromRow<'r, PgRow> for CouponRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("kind")?;
        let status: String = row.try_get("status")?;

        let kind = match kind.as_str() {
            "fixed" => CouponKind::Fixed {
                amount: try_get_amount(row, "amount")?,
            },
            "percent" => CouponKind::Percent {
                percentage: row.try_get::<Decimal, _>("percentage")?,
            },
            other => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "kind".to_string(),
                    source: format!("unknown coupon kind: {other}").into(),
                });
            }
        };

        Ok(Self {
            uuid: CouponUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            kind,
            status: status.parse().map_err(|error| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(error),
            })?,
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            usage_limit: try_get_optional_count(row, "usage_limit")?,
            usage_count: try_get_count(row, "usage_count")?,
            minimum_amount: try_get_amount(row, "minimum_amount")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
