//! Row decoding helpers shared by repositories.

use sqlx::{Row, postgres::PgRow};

/// Read a non-negative `BIGINT` amount column.
pub(crate) fn try_get_amount(row: &PgRow, column: &str) -> sqlx::Result<u64> {
    let amount: i64 = row.try_get(column)?;

    u64::try_from(amount).map_err(|error| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    })
}

/// Read a nullable non-negative `BIGINT` amount column.
pub(crate) fn try_get_optional_amount(row: &PgRow, column: &str) -> sqlx::Result<Option<u64>> {
    let amount: Option<i64> = row.try_get(column)?;

    amount
        .map(u64::try_from)
        .transpose()
        .map_err(|error| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(error),
        })
}

/// Read a non-negative `INTEGER` count column (stock, quantity, usage).
pub(crate) fn try_get_count(row: &PgRow, column: &str) -> sqlx::Result<u32> {
    let count: i32 = row.try_get(column)?;

    u32::try_from(count).map_err(|error| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    })
}

/// Read a nullable non-negative `INTEGER` count column.
pub(crate) fn try_get_optional_count(row: &PgRow, column: &str) -> sqlx::Result<Option<u32>> {
    let count: Option<i32> = row.try_get(column)?;

    count
        .map(u32::try_from)
        .transpose()
        .map_err(|error| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(error),
        })
}

/// Encode an amount for binding to a `BIGINT` parameter.
pub(crate) fn amount_param(amount: u64, column: &str) -> sqlx::Result<i64> {
    i64::try_from(amount).map_err(|error| sqlx::Error::Encode(Box::new(ColumnRange::new(column, error))))
}

/// Encode a count for binding to an `INTEGER` parameter.
pub(crate) fn count_param(count: u32, column: &str) -> sqlx::Result<i32> {
    i32::try_from(count).map_err(|error| sqlx::Error::Encode(Box::new(ColumnRange::new(column, error))))
}

#[derive(Debug, thiserror::Error)]
#[error("value for `{column}` is out of range")]
struct ColumnRange {
    column: String,

    #[source]
    source: std::num::TryFromIntError,
}

impl ColumnRange {
    fn new(column: &str, source: std::num::TryFromIntError) -> Self {
        Self {
            column: column.to_string(),
            source,
        }
    }
}
