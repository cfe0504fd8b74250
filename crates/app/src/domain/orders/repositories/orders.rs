//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use storefront::orders::OrderStatus;

use crate::{
    domain::{
        customers::records::CustomerUuid,
        orders::records::{OrderRecord, OrderUuid, ShippingAddress},
        rows::{amount_param, count_param, try_get_amount, try_get_count},
    },
    pagination::Page,
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_CUSTOMER_ORDER_SQL: &str = include_str!("../sql/get_customer_order.sql");
const LOCK_CUSTOMER_ORDER_SQL: &str = include_str!("../sql/lock_customer_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("../sql/lock_order.sql");
const LOCK_ORDER_BY_REFERENCE_SQL: &str = include_str!("../sql/lock_order_by_reference.sql");
const LIST_CUSTOMER_ORDERS_SQL: &str = include_str!("../sql/list_customer_orders.sql");
const COUNT_CUSTOMER_ORDERS_SQL: &str = include_str!("../sql/count_customer_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("../sql/update_order_status.sql");
const SET_PAYMENT_REFERENCE_SQL: &str = include_str!("../sql/set_payment_reference.sql");
const RECORD_PAYMENT_PROOF_SQL: &str = include_str!("../sql/record_payment_proof.sql");
const MARK_ORDER_PAID_SQL: &str = include_str!("../sql/mark_order_paid.sql");

/// Values of a freshly placed order.
#[derive(Debug, Clone)]
pub(crate) struct OrderInsert<'a> {
    pub uuid: OrderUuid,
    pub order_number: &'a str,
    pub customer: CustomerUuid,
    pub sub_total: u64,
    pub discount: u64,
    pub total_amount: u64,
    pub quantity: u32,
    pub coupon_code: Option<&'a str>,
    pub payment_method: &'a str,
    pub address: &'a ShippingAddress,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an order. `None` when the order number is already taken.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderInsert<'_>,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.order_number)
            .bind(order.customer.into_uuid())
            .bind(amount_param(order.sub_total, "sub_total")?)
            .bind(amount_param(order.discount, "discount")?)
            .bind(amount_param(order.total_amount, "total_amount")?)
            .bind(count_param(order.quantity, "quantity")?)
            .bind(order.coupon_code)
            .bind(order.payment_method)
            .bind(&order.address.first_name)
            .bind(&order.address.last_name)
            .bind(&order.address.email)
            .bind(&order.address.phone)
            .bind(&order.address.country)
            .bind(order.address.post_code.as_deref())
            .bind(&order.address.address1)
            .bind(order.address.address2.as_deref())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_customer_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_CUSTOMER_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_customer_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_CUSTOMER_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Order a gateway knows by its own reference.
    pub(crate) async fn lock_order_by_reference(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment_method: &str,
        reference: &str,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_BY_REFERENCE_SQL)
            .bind(payment_method)
            .bind(reference)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_customer_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        page: Page,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_CUSTOMER_ORDERS_SQL)
            .bind(customer.into_uuid())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_customer_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_CUSTOMER_ORDERS_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Replace the payment reference, provided it is still `previous` and
    /// the order still awaits payment. `None` otherwise.
    pub(crate) async fn set_payment_reference(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        reference: &str,
        previous: Option<&str>,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(SET_PAYMENT_REFERENCE_SQL)
            .bind(order.into_uuid())
            .bind(reference)
            .bind(previous)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Store the proof of an offline payment and start processing a `new` order.
    pub(crate) async fn record_payment_proof(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        proof: Option<&str>,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(RECORD_PAYMENT_PROOF_SQL)
            .bind(order.into_uuid())
            .bind(proof)
            .fetch_one(&mut **tx)
            .await
    }

    /// Mark an unpaid order paid. `None` when it was already paid or has
    /// been cancelled.
    pub(crate) async fn mark_paid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(MARK_ORDER_PAID_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let payment_status: String = row.try_get("payment_status")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            order_number: row.try_get("order_number")?,
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            sub_total: try_get_amount(row, "sub_total")?,
            discount: try_get_amount(row, "discount")?,
            total_amount: try_get_amount(row, "total_amount")?,
            quantity: try_get_count(row, "quantity")?,
            coupon_code: row.try_get("coupon_code")?,
            status: status.parse().map_err(|error| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(error),
            })?,
            payment_method: row.try_get("payment_method")?,
            payment_status: payment_status.parse().map_err(|error| {
                sqlx::Error::ColumnDecode {
                    index: "payment_status".to_string(),
                    source: Box::new(error),
                }
            })?,
            payment_reference: row.try_get("payment_reference")?,
            payment_proof: row.try_get("payment_proof")?,
            address: ShippingAddress {
                first_name: row.try_get("first_name")?,
                last_name: row.try_get("last_name")?,
                email: row.try_get("email")?,
                phone: row.try_get("phone")?,
                country: row.try_get("country")?,
                post_code: row.try_get("post_code")?,
                address1: row.try_get("address1")?,
                address2: row.try_get("address2")?,
            },
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
