//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        coupons::{CouponsService, PgCouponsService},
        customers::{CustomersService, PgCustomersService},
        orders::{OrdersService, PgOrdersService},
        payments::{
            PaymentSettings, PaymentsService, PgPaymentsService, paypal::ReqwestPaypalClient,
        },
        products::{PgProductsService, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub customers: Arc<dyn CustomersService>,
    pub products: Arc<dyn ProductsService>,
    pub coupons: Arc<dyn CouponsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub payments: Arc<dyn PaymentsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        payments: PaymentSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool), payments))
    }

    #[must_use]
    pub fn from_db(db: Db, payments: PaymentSettings) -> Self {
        Self {
            auth: Arc::new(PgAuthService::new(db.clone())),
            customers: Arc::new(PgCustomersService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            coupons: Arc::new(PgCouponsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            payments: Arc::new(PgPaymentsService::new(
                db,
                Arc::new(ReqwestPaypalClient::new()),
                payments,
            )),
        }
    }
}
