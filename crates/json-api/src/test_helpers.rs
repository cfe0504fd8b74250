//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use storefront_app::{
    auth::{AuthenticatedCustomer, MockAuthService},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        coupons::MockCouponsService,
        customers::{
            MockCustomersService,
            records::{CustomerRecord, CustomerRole, CustomerUuid},
        },
        orders::MockOrdersService,
        payments::MockPaymentsService,
        products::MockProductsService,
    },
};
use uuid::Uuid;

use crate::{
    errors,
    extensions::*,
    state::{PaymentRedirects, State},
};

pub(crate) const TEST_CUSTOMER: AuthenticatedCustomer = AuthenticatedCustomer {
    customer_uuid: CustomerUuid::from_uuid(Uuid::nil()),
    token_uuid: Uuid::nil(),
    role: CustomerRole::Customer,
};

pub(crate) const TEST_ADMIN: AuthenticatedCustomer = AuthenticatedCustomer {
    customer_uuid: CustomerUuid::from_uuid(Uuid::from_u128(1)),
    token_uuid: Uuid::from_u128(1),
    role: CustomerRole::Admin,
};

pub(crate) const SUCCESS_URL: &str = "https://shop.example/checkout/success";
pub(crate) const CANCEL_URL: &str = "https://shop.example/checkout/cancel";

/// Service mocks with no expectations; any unexpected call fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub auth: MockAuthService,
    pub customers: MockCustomersService,
    pub products: MockProductsService,
    pub coupons: MockCouponsService,
    pub carts: MockCartsService,
    pub orders: MockOrdersService,
    pub payments: MockPaymentsService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::shared(
            AppContext {
                auth: Arc::new(self.auth),
                customers: Arc::new(self.customers),
                products: Arc::new(self.products),
                coupons: Arc::new(self.coupons),
                carts: Arc::new(self.carts),
                orders: Arc::new(self.orders),
                payments: Arc::new(self.payments),
            },
            PaymentRedirects {
                success_url: SUCCESS_URL.to_string(),
                cancel_url: CANCEL_URL.to_string(),
            },
        )
    }
}

#[salvo::handler]
async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_customer(TEST_CUSTOMER);
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
async fn inject_admin(req: &mut Request, depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
    depot.insert_customer(TEST_ADMIN);
    ctrl.call_next(req, depot, res).await;
}

/// Serve `route` with no signed-in customer.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
        .catcher(errors::catcher())
}

/// Serve `route` as [`TEST_CUSTOMER`].
pub(crate) fn customer_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_customer)
            .push(route),
    )
    .catcher(errors::catcher())
}

/// Serve `route` as [`TEST_ADMIN`].
pub(crate) fn admin_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_admin)
            .push(route),
    )
    .catcher(errors::catcher())
}

pub(crate) fn make_customer(uuid: CustomerUuid) -> CustomerRecord {
    CustomerRecord {
        uuid,
        email: "ada@example.com".to_string(),
        name: "Ada Lovelace".to_string(),
        role: CustomerRole::Customer,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
