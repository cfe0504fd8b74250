//! App Router

use salvo::Router;

use crate::{
    auth, carts, coupons, healthcheck, observability::metrics_handler, orders, payments, products,
};

/// Every API route. Public routes come first so that reads of the catalog
/// never reach the bearer check.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(public_routes())
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(customer_routes())
                .push(
                    Router::new()
                        .hoop(auth::middleware::require_admin)
                        .push(admin_routes()),
                ),
        )
}

fn public_routes() -> Router {
    Router::new()
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::register::handler))
                .push(Router::with_path("login").post(auth::login::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(Router::with_path("webhook/{gateway}").post(payments::webhook::handler))
}

fn customer_routes() -> Router {
    Router::new()
        .push(
            Router::with_path("auth")
                .push(Router::with_path("me").get(auth::me::handler))
                .push(Router::with_path("logout").post(auth::logout::handler)),
        )
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::add_item::handler)
                        .push(
                            Router::with_path("{item}")
                                .put(carts::update_item::handler)
                                .delete(carts::remove_item::handler),
                        ),
                )
                .push(
                    Router::with_path("coupon")
                        .post(carts::apply_coupon::handler)
                        .delete(carts::remove_coupon::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("cancel").post(orders::cancel::handler))
                        .push(
                            Router::with_path("payment")
                                .post(payments::pay::handler)
                                .push(
                                    Router::with_path("paypal/return")
                                        .get(payments::paypal_return::handler),
                                )
                                .push(
                                    Router::with_path("paypal/cancel")
                                        .get(payments::paypal_cancel::handler),
                                ),
                        ),
                ),
        )
}

fn admin_routes() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler)
                        .push(Router::with_path("variants").post(products::variants::handler)),
                ),
        )
        .push(
            Router::with_path("coupons")
                .get(coupons::index::handler)
                .post(coupons::create::handler)
                .push(Router::with_path("{coupon}").delete(coupons::delete::handler)),
        )
        .push(Router::with_path("orders/{order}/status").put(orders::status::handler))
}
