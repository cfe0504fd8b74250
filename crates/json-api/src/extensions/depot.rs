//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use storefront_app::auth::AuthenticatedCustomer;

const CUSTOMER_DEPOT_KEY: &str = "customer";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_customer(&mut self, customer: AuthenticatedCustomer);

    fn customer_or_401(&self) -> Result<AuthenticatedCustomer, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_customer(&mut self, customer: AuthenticatedCustomer) {
        self.insert(CUSTOMER_DEPOT_KEY, customer);
    }

    fn customer_or_401(&self) -> Result<AuthenticatedCustomer, StatusError> {
        self.get::<AuthenticatedCustomer>(CUSTOMER_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Unauthenticated"))
    }
}
