//! Payment Handlers

pub(crate) mod pay;
pub(crate) mod paypal_cancel;
pub(crate) mod paypal_return;
pub(crate) mod webhook;
