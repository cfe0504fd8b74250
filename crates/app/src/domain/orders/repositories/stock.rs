//! Order Stock Repository
//!
//! Moves stock when an order is placed or cancelled. A line with a variant
//! draws on the variant's stock only.

use sqlx::{Postgres, Transaction, query};

use crate::domain::{
    products::records::{ProductUuid, VariantUuid},
    rows::count_param,
};

const DECREMENT_PRODUCT_STOCK_SQL: &str = include_str!("../sql/decrement_product_stock.sql");
const DECREMENT_VARIANT_STOCK_SQL: &str = include_str!("../sql/decrement_variant_stock.sql");
const RESTORE_PRODUCT_STOCK_SQL: &str = include_str!("../sql/restore_product_stock.sql");
const RESTORE_VARIANT_STOCK_SQL: &str = include_str!("../sql/restore_variant_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderStockRepository;

impl PgOrderStockRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Take `quantity` units. Returns `false` when fewer remain.
    pub(crate) async fn decrement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        variant: Option<VariantUuid>,
        quantity: u32,
    ) -> Result<bool, sqlx::Error> {
        let quantity = count_param(quantity, "quantity")?;

        let result = match variant {
            Some(variant) => {
                query(DECREMENT_VARIANT_STOCK_SQL)
                    .bind(product.into_uuid())
                    .bind(variant.into_uuid())
                    .bind(quantity)
                    .execute(&mut **tx)
                    .await?
            }
            None => {
                query(DECREMENT_PRODUCT_STOCK_SQL)
                    .bind(product.into_uuid())
                    .bind(quantity)
                    .execute(&mut **tx)
                    .await?
            }
        };

        Ok(result.rows_affected() == 1)
    }

    pub(crate) async fn restore(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        variant: Option<VariantUuid>,
        quantity: u32,
    ) -> Result<(), sqlx::Error> {
        let quantity = count_param(quantity, "quantity")?;

        match variant {
            Some(variant) => {
                query(RESTORE_VARIANT_STOCK_SQL)
                    .bind(product.into_uuid())
                    .bind(variant.into_uuid())
                    .bind(quantity)
                    .execute(&mut **tx)
                    .await?;
            }
            None => {
                query(RESTORE_PRODUCT_STOCK_SQL)
                    .bind(product.into_uuid())
                    .bind(quantity)
                    .execute(&mut **tx)
                    .await?;
            }
        }

        Ok(())
    }
}
