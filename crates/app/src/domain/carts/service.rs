//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use storefront::{
    coupons::{CouponError, normalize_code},
    pricing::{check_stock, line_amount},
};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            pricing::{apply_coupon, line_totals},
            records::{AppliedCouponRecord, CartItemRecord, CartItemUuid, CartRecord},
            repositories::{
                LineValues, PgAppliedCouponsRepository, PgCartItemsRepository,
                PgStockRepository,
            },
        },
        coupons::repository::PgCouponsRepository,
        customers::{records::CustomerUuid, repository::PgCustomersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    items_repository: PgCartItemsRepository,
    stock_repository: PgStockRepository,
    applied_coupons_repository: PgAppliedCouponsRepository,
    coupons_repository: PgCouponsRepository,
    customers_repository: PgCustomersRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items_repository: PgCartItemsRepository::new(),
            stock_repository: PgStockRepository::new(),
            applied_coupons_repository: PgAppliedCouponsRepository::new(),
            coupons_repository: PgCouponsRepository::new(),
            customers_repository: PgCustomersRepository::new(),
        }
    }

    /// Begin a cart write. The customer row is locked first, so cart writes
    /// and checkout for one customer never interleave.
    async fn begin_for(
        &self,
        customer: CustomerUuid,
    ) -> Result<Transaction<'static, Postgres>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        if !self
            .customers_repository
            .lock_customer(&mut tx, customer)
            .await?
        {
            return Err(CartsServiceError::NotFound);
        }

        Ok(tx)
    }

    /// Build the cart view. An applied coupon the cart no longer qualifies
    /// for is left out of the totals.
    async fn load_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let items = self.items_repository.list_open_items(tx, customer).await?;
        let totals = line_totals(&items)?;

        let applied = self
            .applied_coupons_repository
            .get_applied_coupon(tx, customer)
            .await?;

        let (totals, coupon) = match applied {
            Some(coupon) if !items.is_empty() => {
                match apply_coupon(totals, &coupon, Timestamp::now()) {
                    Ok((totals, applied)) => (totals, Some(applied)),
                    Err(_rejected) => (totals, None),
                }
            }
            Some(_) | None => (totals, None),
        };

        Ok(CartRecord {
            customer_uuid: customer,
            items,
            totals,
            coupon,
        })
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, customer: CustomerUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.load_cart(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(
            customer_uuid = %customer,
            product_uuid = %item.product_uuid,
            quantity = item.quantity,
            cart_item_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn add_item(
        &self,
        customer: CustomerUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.begin_for(customer).await?;

        let selection = self
            .stock_repository
            .lock_selection(&mut tx, item.product_uuid, item.variant_uuid)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        let existing = self
            .items_repository
            .find_open_line_for_update(&mut tx, customer, item.product_uuid, item.variant_uuid)
            .await?;

        let quantity = existing
            .as_ref()
            .map_or(0, |line| line.quantity)
            .checked_add(item.quantity)
            .ok_or(CartsServiceError::InvalidQuantity)?;

        check_stock(selection.available(), u64::from(quantity))?;

        let price = selection.unit_price();
        let values = LineValues {
            quantity,
            price,
            amount: line_amount(price, quantity)?,
        };

        let saved = match existing {
            Some(line) => {
                self.items_repository
                    .update_cart_item(&mut tx, customer, line.uuid, values)
                    .await?
            }
            None => {
                self.items_repository
                    .create_cart_item(
                        &mut tx,
                        customer,
                        item.uuid,
                        item.product_uuid,
                        item.variant_uuid,
                        values,
                    )
                    .await?
            }
        };

        tx.commit().await?;

        Span::current().record("cart_item_uuid", tracing::field::display(saved.uuid));

        Ok(saved)
    }

    #[tracing::instrument(
        name = "carts.service.update_item",
        skip(self),
        fields(customer_uuid = %customer, cart_item_uuid = %item),
        err
    )]
    async fn update_item(
        &self,
        customer: CustomerUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.begin_for(customer).await?;

        let line = self
            .items_repository
            .get_open_item(&mut tx, customer, item)
            .await?;

        // Product and variant before the line, as in add_item.
        let selection = self
            .stock_repository
            .lock_selection(&mut tx, line.product_uuid, line.variant_uuid)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        check_stock(selection.available(), u64::from(quantity))?;

        let price = selection.unit_price();
        let values = LineValues {
            quantity,
            price,
            amount: line_amount(price, quantity)?,
        };

        let updated = self
            .items_repository
            .update_cart_item(&mut tx, customer, item, values)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self),
        fields(customer_uuid = %customer, cart_item_uuid = %item),
        err
    )]
    async fn remove_item(
        &self,
        customer: CustomerUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.begin_for(customer).await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, customer, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "carts.service.apply_coupon",
        skip(self, code),
        fields(customer_uuid = %customer, coupon_code = tracing::field::Empty),
        err
    )]
    async fn apply_coupon(
        &self,
        customer: CustomerUuid,
        code: &str,
    ) -> Result<AppliedCouponRecord, CartsServiceError> {
        let code = normalize_code(code).map_err(|_malformed| CouponError::InvalidOrInactive)?;

        Span::current().record("coupon_code", code.as_str());

        let mut tx = self.begin_for(customer).await?;

        let coupon = self
            .coupons_repository
            .find_active_by_code(&mut tx, &code)
            .await?
            .ok_or(CouponError::InvalidOrInactive)?;

        let items = self.items_repository.list_open_items(&mut tx, customer).await?;

        if items.is_empty() {
            return Err(CartsServiceError::EmptyCart);
        }

        let (_totals, applied) = apply_coupon(line_totals(&items)?, &coupon, Timestamp::now())?;

        self.applied_coupons_repository
            .set_applied_coupon(&mut tx, customer, coupon.uuid)
            .await?;

        tx.commit().await?;

        info!(discount = applied.discount, "coupon applied");

        Ok(applied)
    }

    #[tracing::instrument(
        name = "carts.service.remove_coupon",
        skip(self),
        fields(customer_uuid = %customer),
        err
    )]
    async fn remove_coupon(&self, customer: CustomerUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.begin_for(customer).await?;

        let rows_affected = self
            .applied_coupons_repository
            .clear_applied_coupon(&mut tx, customer)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The customer's open lines, totals and applied coupon.
    async fn get_cart(&self, customer: CustomerUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add a product (or variant) to the cart, merging into an existing line
    /// for the same selection.
    async fn add_item(
        &self,
        customer: CustomerUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Set the quantity of an open line.
    async fn update_item(
        &self,
        customer: CustomerUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Remove an open line.
    async fn remove_item(
        &self,
        customer: CustomerUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError>;

    /// Apply a coupon code to the cart.
    async fn apply_coupon(
        &self,
        customer: CustomerUuid,
        code: &str,
    ) -> Result<AppliedCouponRecord, CartsServiceError>;

    /// Detach the applied coupon.
    async fn remove_coupon(&self, customer: CustomerUuid) -> Result<(), CartsServiceError>;
}
