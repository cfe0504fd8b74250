//! State

use std::sync::Arc;

use storefront_app::context::AppContext;

/// Where the browser is sent once a payment attempt settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PaymentRedirects {
    pub(crate) success_url: String,
    pub(crate) cancel_url: String,
}

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) redirects: PaymentRedirects,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, redirects: PaymentRedirects) -> Self {
        Self { app, redirects }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, redirects: PaymentRedirects) -> Arc<Self> {
        Arc::new(Self::new(app, redirects))
    }
}
