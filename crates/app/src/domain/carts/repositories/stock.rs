//! Stock Repository
//!
//! Locks the product (and variant) row a cart line draws on so the stock
//! check and the line write see the same stock.

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use storefront::pricing::{available_stock, unit_price};

use crate::domain::{
    products::records::{ProductUuid, VariantUuid},
    rows::{try_get_amount, try_get_count, try_get_optional_amount, try_get_optional_count},
};

const LOCK_PRODUCT_STOCK_SQL: &str = include_str!("../sql/lock_product_stock.sql");
const LOCK_VARIANT_STOCK_SQL: &str = include_str!("../sql/lock_variant_stock.sql");

/// Prices and stock of a locked product/variant selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StockSelection {
    pub product_price: u64,
    pub product_stock: u32,
    pub variant_price: Option<u64>,
    pub variant_stock: Option<u32>,
}

impl StockSelection {
    pub(crate) fn unit_price(&self) -> u64 {
        unit_price(self.product_price, self.variant_price)
    }

    pub(crate) fn available(&self) -> i64 {
        available_stock(
            i64::from(self.product_stock),
            self.variant_stock.map(i64::from),
        )
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStockRepository;

impl PgStockRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lock and read a selection. `None` when the product is gone or the
    /// variant does not belong to it.
    pub(crate) async fn lock_selection(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        variant: Option<VariantUuid>,
    ) -> Result<Option<StockSelection>, sqlx::Error> {
        match variant {
            Some(variant) => {
                query_as::<Postgres, StockSelection>(LOCK_VARIANT_STOCK_SQL)
                    .bind(product.into_uuid())
                    .bind(variant.into_uuid())
                    .fetch_optional(&mut **tx)
                    .await
            }
            None => {
                query_as::<Postgres, StockSelection>(LOCK_PRODUCT_STOCK_SQL)
                    .bind(product.into_uuid())
                    .fetch_optional(&mut **tx)
                    .await
            }
        }
    }
}

impl<'r> FromRow<'r, PgRow> for StockSelection {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_price: try_get_amount(row, "price")?,
            product_stock: try_get_count(row, "stock")?,
            variant_price: try_get_optional_amount(row, "variant_price")?,
            variant_stock: try_get_optional_count(row, "variant_stock")?,
        })
    }
}
