//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    carts::records::{CartItemRecord, CartItemUuid},
    customers::records::CustomerUuid,
    orders::records::OrderUuid,
    products::records::{ProductUuid, VariantUuid},
    rows::{amount_param, count_param, try_get_amount, try_get_count},
};

const LIST_OPEN_ITEMS_SQL: &str = include_str!("../sql/list_open_items.sql");
const LOCK_OPEN_ITEMS_SQL: &str = include_str!("../sql/lock_open_items.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");
const GET_OPEN_ITEM_SQL: &str = include_str!("../sql/get_open_item.sql");
const FIND_OPEN_LINE_FOR_UPDATE_SQL: &str = include_str!("../sql/find_open_line_for_update.sql");
const CREATE_CART_ITEM_SQL: &str = include_str!("../sql/create_cart_item.sql");
const UPDATE_CART_ITEM_SQL: &str = include_str!("../sql/update_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const ATTACH_OPEN_ITEMS_SQL: &str = include_str!("../sql/attach_open_items.sql");

/// Values written for a cart line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineValues {
    pub quantity: u32,
    pub price: u64,
    pub amount: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_open_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(LIST_OPEN_ITEMS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Open lines, locked until the transaction ends.
    pub(crate) async fn lock_open_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(LOCK_OPEN_ITEMS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_open_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        item: CartItemUuid,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(GET_OPEN_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// The open line for a product/variant selection, locked.
    pub(crate) async fn find_open_line_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        product: ProductUuid,
        variant: Option<VariantUuid>,
    ) -> Result<Option<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(FIND_OPEN_LINE_FOR_UPDATE_SQL)
            .bind(customer.into_uuid())
            .bind(product.into_uuid())
            .bind(variant.map(VariantUuid::into_uuid))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        item: CartItemUuid,
        product: ProductUuid,
        variant: Option<VariantUuid>,
        values: LineValues,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(CREATE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(customer.into_uuid())
            .bind(product.into_uuid())
            .bind(variant.map(VariantUuid::into_uuid))
            .bind(count_param(values.quantity, "quantity")?)
            .bind(amount_param(values.price, "price")?)
            .bind(amount_param(values.amount, "amount")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        item: CartItemUuid,
        values: LineValues,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(UPDATE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(customer.into_uuid())
            .bind(count_param(values.quantity, "quantity")?)
            .bind(amount_param(values.price, "price")?)
            .bind(amount_param(values.amount, "amount")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(customer.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Link the given open lines to `order`. Lines outside `items` stay in
    /// the cart.
    pub(crate) async fn attach_open_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        items: &[CartItemUuid],
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let items: Vec<Uuid> = items.iter().copied().map(CartItemUuid::into_uuid).collect();

        let rows_affected = query(ATTACH_OPEN_ITEMS_SQL)
            .bind(customer.into_uuid())
            .bind(items)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            variant_uuid: row
                .try_get::<Option<Uuid>, _>("variant_uuid")?
                .map(VariantUuid::from_uuid),
            title: row.try_get("title")?,
            size: row.try_get("size")?,
            color: row.try_get("color")?,
            quantity: try_get_count(row, "quantity")?,
            price: try_get_amount(row, "price")?,
            amount: try_get_amount(row, "amount")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
