//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rand::{Rng, distributions::Alphanumeric};
use sqlx::{Postgres, Transaction};
use storefront::{
    coupons::CouponError,
    orders::{OrderStatus, order_number},
};
use tracing::{Span, info, warn};

use crate::{
    database::Db,
    domain::{
        carts::{
            pricing::{apply_coupon, line_totals},
            records::{CartItemRecord, CartItemUuid},
            repositories::{PgAppliedCouponsRepository, PgCartItemsRepository},
        },
        coupons::repository::PgCouponsRepository,
        customers::{records::CustomerUuid, repository::PgCustomersRepository},
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid},
            repositories::{OrderInsert, PgOrderStockRepository, PgOrdersRepository},
        },
        payments::repository::PgGatewaysRepository,
    },
    pagination::{Page, Paginated},
};

/// Attempts at finding an unused order number.
const ORDER_NUMBER_ATTEMPTS: usize = 5;

fn generate_order_number() -> String {
    order_number(
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .map(char::from),
    )
}

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    stock_repository: PgOrderStockRepository,
    items_repository: PgCartItemsRepository,
    applied_coupons_repository: PgAppliedCouponsRepository,
    coupons_repository: PgCouponsRepository,
    gateways_repository: PgGatewaysRepository,
    customers_repository: PgCustomersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            stock_repository: PgOrderStockRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            applied_coupons_repository: PgAppliedCouponsRepository::new(),
            coupons_repository: PgCouponsRepository::new(),
            gateways_repository: PgGatewaysRepository::new(),
            customers_repository: PgCustomersRepository::new(),
        }
    }

    /// Give back what a cancelled order took: one coupon use, then stock.
    async fn release_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderRecord,
        items: &[CartItemRecord],
    ) -> Result<(), OrdersServiceError> {
        if let Some(code) = order.coupon_code.as_deref() {
            let released = self
                .coupons_repository
                .release_usage(tx, code, order.created_at)
                .await?;

            if !released {
                warn!(coupon_code = code, "coupon no longer exists, usage not released");
            }
        }

        for item in stock_order(items) {
            self.stock_repository
                .restore(tx, item.product_uuid, item.variant_uuid, item.quantity)
                .await?;
        }

        Ok(())
    }
}

/// Lines sorted by product then variant, the order stock rows are locked in.
fn stock_order(items: &[CartItemRecord]) -> Vec<&CartItemRecord> {
    let mut sorted: Vec<&CartItemRecord> = items.iter().collect();

    sorted.sort_by_key(|item| (item.product_uuid, item.variant_uuid));

    sorted
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.place_order",
        skip(self, order),
        fields(
            customer_uuid = %customer,
            order_uuid = %order.uuid,
            payment_method = tracing::field::Empty,
            order_number = tracing::field::Empty
        ),
        err
    )]
    async fn place_order(
        &self,
        customer: CustomerUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let order = order.validated()?;

        Span::current().record("payment_method", order.payment_method.as_str());

        let mut tx = self.db.begin().await?;

        if !self
            .customers_repository
            .lock_customer(&mut tx, customer)
            .await?
        {
            return Err(OrdersServiceError::NotFound);
        }

        self.gateways_repository
            .get_gateway(&mut tx, &order.payment_method)
            .await?
            .filter(|gateway| gateway.enabled)
            .ok_or(OrdersServiceError::UnknownPaymentMethod)?;

        let items = self.items_repository.lock_open_items(&mut tx, customer).await?;

        if items.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let mut totals = line_totals(&items)?;
        let mut coupon_code = None;

        let applied = self
            .applied_coupons_repository
            .get_applied_coupon(&mut tx, customer)
            .await?;

        if let Some(applied) = applied {
            let coupon = self
                .coupons_repository
                .get_coupon_for_update(&mut tx, applied.uuid)
                .await?
                .ok_or(CouponError::InvalidOrInactive)?;

            let (discounted, _applied) = apply_coupon(totals, &coupon, Timestamp::now())?;

            if !self
                .coupons_repository
                .increment_usage(&mut tx, coupon.uuid)
                .await?
            {
                return Err(CouponError::LimitReached.into());
            }

            totals = discounted;
            coupon_code = Some(coupon.code);
        }

        for item in stock_order(&items) {
            let taken = self
                .stock_repository
                .decrement(&mut tx, item.product_uuid, item.variant_uuid, item.quantity)
                .await?;

            if !taken {
                return Err(OrdersServiceError::StockNotSufficient {
                    title: item.title.clone(),
                });
            }
        }

        let quantity =
            u32::try_from(totals.quantity).map_err(|_overflow| OrdersServiceError::InvalidData)?;

        let mut created = None;

        for attempt in 1..=ORDER_NUMBER_ATTEMPTS {
            let number = generate_order_number();

            let insert = OrderInsert {
                uuid: order.uuid,
                order_number: &number,
                customer,
                sub_total: totals.subtotal,
                discount: totals.discount,
                total_amount: totals.total,
                quantity,
                coupon_code: coupon_code.as_deref(),
                payment_method: &order.payment_method,
                address: &order.address,
            };

            created = self.orders_repository.create_order(&mut tx, &insert).await?;

            if created.is_some() {
                break;
            }

            warn!(attempt, "order number collision");
        }

        let mut created = created.ok_or(OrdersServiceError::OrderNumberExhausted)?;

        let locked: Vec<CartItemUuid> = items.iter().map(|item| item.uuid).collect();

        let attached = self
            .items_repository
            .attach_open_items(&mut tx, customer, &locked, created.uuid)
            .await?;

        if usize::try_from(attached).ok() != Some(locked.len()) {
            return Err(OrdersServiceError::CartChanged);
        }

        self.applied_coupons_repository
            .clear_applied_coupon(&mut tx, customer)
            .await?;

        created.items = self
            .items_repository
            .list_order_items(&mut tx, created.uuid)
            .await?;

        tx.commit().await?;

        Span::current().record("order_number", created.order_number.as_str());

        info!(
            total_amount = created.total_amount,
            quantity = created.quantity,
            "order placed"
        );

        Ok(created)
    }

    async fn list_orders(
        &self,
        customer: CustomerUuid,
        page: Page,
    ) -> Result<Paginated<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .orders_repository
            .list_customer_orders(&mut tx, customer, page)
            .await?;

        let total = self
            .orders_repository
            .count_customer_orders(&mut tx, customer)
            .await?;

        tx.commit().await?;

        Ok(Paginated {
            items: orders,
            total: u64::try_from(total).unwrap_or_default(),
            page,
        })
    }

    async fn get_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut record = self
            .orders_repository
            .get_customer_order(&mut tx, customer, order)
            .await?;

        record.items = self
            .items_repository
            .list_order_items(&mut tx, order)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "orders.service.cancel_order",
        skip(self),
        fields(customer_uuid = %customer, order_uuid = %order),
        err
    )]
    async fn cancel_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .orders_repository
            .lock_customer_order(&mut tx, customer, order)
            .await?;

        if !record.awaiting_payment() {
            return Err(OrdersServiceError::NotCancellable);
        }

        let items = self
            .items_repository
            .list_order_items(&mut tx, order)
            .await?;

        self.release_order(&mut tx, &record, &items).await?;

        let mut cancelled = self
            .orders_repository
            .update_status(&mut tx, order, OrderStatus::Cancel)
            .await?;

        tx.commit().await?;

        cancelled.items = items;

        info!(order_number = %cancelled.order_number, "order cancelled");

        Ok(cancelled)
    }

    #[tracing::instrument(
        name = "orders.service.update_status",
        skip(self, status),
        fields(order_uuid = %order, status = %status),
        err
    )]
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.orders_repository.lock_order(&mut tx, order).await?;

        if !record.status.can_transition_to(status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: record.status,
                to: status,
            });
        }

        let items = self
            .items_repository
            .list_order_items(&mut tx, order)
            .await?;

        if status.releases_stock() {
            self.release_order(&mut tx, &record, &items).await?;
        }

        let mut updated = self
            .orders_repository
            .update_status(&mut tx, order, status)
            .await?;

        tx.commit().await?;

        updated.items = items;

        info!(from = %record.status, "order status updated");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the customer's open cart into an order.
    async fn place_order(
        &self,
        customer: CustomerUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve a page of the customer's orders, newest first. Lines are not loaded.
    async fn list_orders(
        &self,
        customer: CustomerUuid,
        page: Page,
    ) -> Result<Paginated<OrderRecord>, OrdersServiceError>;

    /// Retrieve one of the customer's orders with its lines.
    async fn get_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Cancel an order that is still `new` and unpaid, restoring its stock
    /// and the coupon use it consumed.
    async fn cancel_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Move an order along its fulfilment lifecycle.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use storefront::orders::{ORDER_NUMBER_LENGTH, ORDER_NUMBER_PREFIX, PaymentStatus};
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::{CartsService, data::NewCartItem, repositories::LineValues},
            coupons::CouponsService,
            products::{ProductsService, records::ProductUuid},
        },
        test::{
            TestContext,
            helpers::{checkout, percent_coupon},
        },
    };

    use super::*;

    async fn add(
        ctx: &TestContext,
        customer: CustomerUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> TestResult {
        ctx.carts
            .add_item(
                customer,
                NewCartItem {
                    uuid: CartItemUuid::new(),
                    product_uuid: product,
                    variant_uuid: None,
                    quantity,
                },
            )
            .await?;

        Ok(())
    }

    #[test]
    fn generated_order_numbers_are_well_formed() {
        let number = generate_order_number();

        assert!(number.starts_with(ORDER_NUMBER_PREFIX));
        assert_eq!(number.len(), ORDER_NUMBER_PREFIX.len() + ORDER_NUMBER_LENGTH);
        assert!(
            number[ORDER_NUMBER_PREFIX.len()..]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[tokio::test]
    async fn place_order_closes_cart_and_totals_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("ada@example.com").await?;
        let shirt = ctx.create_product("Shirt", 30_00, 5).await?;
        let socks = ctx.create_product("Socks", 10_00, 5).await?;

        ctx.enable_gateway("cod", false).await?;

        add(&ctx, customer, shirt, 1).await?;
        add(&ctx, customer, socks, 2).await?;

        let order = ctx.orders.place_order(customer, checkout("cod")).await?;

        assert_eq!(order.sub_total, 50_00);
        assert_eq!(order.discount, 0);
        assert_eq!(order.total_amount, 50_00);
        assert_eq!(order.quantity, 3);
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.payment_status, PaymentStatus::Unpaid);
        assert!(order.order_number.starts_with(ORDER_NUMBER_PREFIX));
        assert_eq!(order.items.len(), 2);

        assert!(ctx.carts.get_cart(customer).await?.items.is_empty());

        assert_eq!(ctx.products.get_product(shirt).await?.stock, 4);
        assert_eq!(ctx.products.get_product(socks).await?.stock, 3);

        let fetched = ctx.orders.get_order(customer, order.uuid).await?;

        assert_eq!(fetched.items.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_cannot_be_ordered() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("ada@example.com").await?;

        ctx.enable_gateway("cod", false).await?;

        let result = ctx.orders.place_order(customer, checkout("cod")).await;

        assert!(
            matches!(result, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn disabled_gateway_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("ada@example.com").await?;
        let product = ctx.create_product("Shirt", 30_00, 5).await?;

        add(&ctx, customer, product, 1).await?;

        let result = ctx.orders.place_order(customer, checkout("cod")).await;

        assert!(matches!(
            result,
            Err(OrdersServiceError::UnknownPaymentMethod)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn insufficient_stock_rolls_back_everything() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = ctx.create_customer("alice@example.com").await?;
        let bob = ctx.create_customer("bob@example.com").await?;
        let shirt = ctx.create_product("Shirt", 30_00, 5).await?;
        let hat = ctx.create_product("Hat", 15_00, 1).await?;

        ctx.enable_gateway("cod", false).await?;

        add(&ctx, alice, shirt, 2).await?;
        add(&ctx, alice, hat, 1).await?;
        add(&ctx, bob, hat, 1).await?;

        ctx.orders.place_order(bob, checkout("cod")).await?;

        let result = ctx.orders.place_order(alice, checkout("cod")).await;

        assert!(
            matches!(
                &result,
                Err(OrdersServiceError::StockNotSufficient { title }) if title == "Hat"
            ),
            "expected StockNotSufficient, got {result:?}"
        );

        assert_eq!(ctx.carts.get_cart(alice).await?.items.len(), 2);
        assert_eq!(ctx.products.get_product(shirt).await?.stock, 5);
        assert_eq!(
            ctx.orders.list_orders(alice, Page::default()).await?.total,
            0
        );

        Ok(())
    }

    #[tokio::test]
    async fn applied_coupon_is_consumed_by_order() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("ada@example.com").await?;
        let product = ctx.create_product("Jacket", 50_00, 5).await?;

        ctx.enable_gateway("cod", false).await?;

        let coupon = ctx
            .coupons
            .create_coupon(percent_coupon("SAVE10", dec!(10), 50_00))
            .await?;

        add(&ctx, customer, product, 2).await?;
        ctx.carts.apply_coupon(customer, "SAVE10").await?;

        let order = ctx.orders.place_order(customer, checkout("cod")).await?;

        assert_eq!(order.sub_total, 100_00);
        assert_eq!(order.discount, 10_00);
        assert_eq!(order.total_amount, 90_00);
        assert_eq!(order.coupon_code.as_deref(), Some("SAVE10"));

        let page = ctx.coupons.list_coupons(Page::default()).await?;
        let stored = page.items.iter().find(|stored| stored.uuid == coupon.uuid);

        assert_eq!(stored.map(|stored| stored.usage_count), Some(1));
        assert!(ctx.carts.get_cart(customer).await?.coupon.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn lines_added_after_checkout_locked_the_cart_stay_open() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("ada@example.com").await?;
        let shirt = ctx.create_product("Shirt", 30_00, 5).await?;
        let socks = ctx.create_product("Socks", 10_00, 5).await?;

        ctx.enable_gateway("cod", false).await?;

        add(&ctx, customer, shirt, 1).await?;

        let items_repository = PgCartItemsRepository::new();
        let orders_repository = PgOrdersRepository::new();

        let mut checkout_tx = ctx.db.begin().await?;

        let locked = items_repository
            .lock_open_items(&mut checkout_tx, customer)
            .await?;

        assert_eq!(locked.len(), 1);

        let mut late_tx = ctx.db.begin().await?;

        let late = items_repository
            .create_cart_item(
                &mut late_tx,
                customer,
                CartItemUuid::new(),
                socks,
                None,
                LineValues {
                    quantity: 2,
                    price: 10_00,
                    amount: 20_00,
                },
            )
            .await?;

        late_tx.commit().await?;

        let address = checkout("cod").address;
        let order = orders_repository
            .create_order(
                &mut checkout_tx,
                &OrderInsert {
                    uuid: OrderUuid::new(),
                    order_number: "ORD-4F7A9C2B1D",
                    customer,
                    sub_total: 30_00,
                    discount: 0,
                    total_amount: 30_00,
                    quantity: 1,
                    coupon_code: None,
                    payment_method: "cod",
                    address: &address,
                },
            )
            .await?
            .ok_or("order number already taken")?;

        let uuids: Vec<CartItemUuid> = locked.iter().map(|item| item.uuid).collect();

        let attached = items_repository
            .attach_open_items(&mut checkout_tx, customer, &uuids, order.uuid)
            .await?;

        checkout_tx.commit().await?;

        assert_eq!(attached, 1);

        let fetched = ctx.orders.get_order(customer, order.uuid).await?;
        let line_total: u64 = fetched.items.iter().map(|item| item.amount).sum();

        assert_eq!(line_total, fetched.sub_total);

        let cart = ctx.carts.get_cart(customer).await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].uuid, late.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_checkout_and_add_to_cart_both_complete() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("ada@example.com").await?;
        let shirt = ctx.create_product("Shirt", 30_00, 10).await?;

        ctx.enable_gateway("cod", false).await?;

        add(&ctx, customer, shirt, 1).await?;

        let (placed, added) = tokio::join!(
            ctx.orders.place_order(customer, checkout("cod")),
            add(&ctx, customer, shirt, 1),
        );

        let order = placed?;
        added?;

        let order = ctx.orders.get_order(customer, order.uuid).await?;
        let line_total: u64 = order.items.iter().map(|item| item.amount).sum();
        let line_quantity: u32 = order.items.iter().map(|item| item.quantity).sum();

        assert_eq!(line_total, order.sub_total);
        assert_eq!(line_quantity, order.quantity);

        let cart = ctx.carts.get_cart(customer).await?;

        assert_eq!(order.quantity + u32::try_from(cart.totals.quantity)?, 2);
        assert_eq!(
            ctx.products.get_product(shirt).await?.stock,
            10 - order.quantity
        );

        Ok(())
    }

    #[tokio::test]
    async fn cancel_gives_back_coupon_use() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("ada@example.com").await?;
        let product = ctx.create_product("Jacket", 50_00, 5).await?;

        ctx.enable_gateway("cod", false).await?;

        let mut coupon = percent_coupon("ONCE", dec!(10), 0);
        coupon.usage_limit = Some(1);

        let coupon = ctx.coupons.create_coupon(coupon).await?;

        add(&ctx, customer, product, 1).await?;
        ctx.carts.apply_coupon(customer, "ONCE").await?;

        let order = ctx.orders.place_order(customer, checkout("cod")).await?;

        ctx.orders.cancel_order(customer, order.uuid).await?;

        let page = ctx.coupons.list_coupons(Page::default()).await?;
        let stored = page.items.iter().find(|stored| stored.uuid == coupon.uuid);

        assert_eq!(stored.map(|stored| stored.usage_count), Some(0));

        add(&ctx, customer, product, 1).await?;
        ctx.carts.apply_coupon(customer, "ONCE").await?;

        let again = ctx.orders.place_order(customer, checkout("cod")).await?;

        assert_eq!(again.discount, 5_00);

        Ok(())
    }

    #[tokio::test]
    async fn cancel_restores_stock_once() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("ada@example.com").await?;
        let product = ctx.create_product("Shirt", 30_00, 5).await?;

        ctx.enable_gateway("cod", false).await?;

        add(&ctx, customer, product, 2).await?;

        let order = ctx.orders.place_order(customer, checkout("cod")).await?;

        assert_eq!(ctx.products.get_product(product).await?.stock, 3);

        let cancelled = ctx.orders.cancel_order(customer, order.uuid).await?;

        assert_eq!(cancelled.status, OrderStatus::Cancel);
        assert_eq!(ctx.products.get_product(product).await?.stock, 5);

        let result = ctx.orders.cancel_order(customer, order.uuid).await;

        assert!(matches!(result, Err(OrdersServiceError::NotCancellable)));
        assert_eq!(ctx.products.get_product(product).await?.stock, 5);

        Ok(())
    }

    #[tokio::test]
    async fn other_customers_cannot_see_order() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_customer("ada@example.com").await?;
        let other = ctx.create_customer("grace@example.com").await?;
        let product = ctx.create_product("Shirt", 30_00, 5).await?;

        ctx.enable_gateway("cod", false).await?;

        add(&ctx, owner, product, 1).await?;

        let order = ctx.orders.place_order(owner, checkout("cod")).await?;

        assert!(matches!(
            ctx.orders.get_order(other, order.uuid).await,
            Err(OrdersServiceError::NotFound)
        ));
        assert!(matches!(
            ctx.orders.cancel_order(other, order.uuid).await,
            Err(OrdersServiceError::NotFound)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn status_follows_lifecycle() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("ada@example.com").await?;
        let product = ctx.create_product("Shirt", 30_00, 5).await?;

        ctx.enable_gateway("cod", false).await?;

        add(&ctx, customer, product, 1).await?;

        let order = ctx.orders.place_order(customer, checkout("cod")).await?;

        let result = ctx
            .orders
            .update_status(order.uuid, OrderStatus::Delivered)
            .await;

        assert!(matches!(
            result,
            Err(OrdersServiceError::InvalidTransition {
                from: OrderStatus::New,
                to: OrderStatus::Delivered
            })
        ));

        ctx.orders
            .update_status(order.uuid, OrderStatus::Process)
            .await?;

        let delivered = ctx
            .orders
            .update_status(order.uuid, OrderStatus::Delivered)
            .await?;

        assert_eq!(delivered.status, OrderStatus::Delivered);

        let result = ctx
            .orders
            .update_status(order.uuid, OrderStatus::Cancel)
            .await;

        assert!(matches!(
            result,
            Err(OrdersServiceError::InvalidTransition { .. })
        ));
        assert_eq!(ctx.products.get_product(product).await?.stock, 4);

        Ok(())
    }
}
