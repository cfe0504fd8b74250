//! Payments

pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod redirect;

pub(crate) use handlers::*;
