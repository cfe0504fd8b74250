//! Storefront Domain Concerns

pub mod carts;
pub mod coupons;
pub mod customers;
pub mod orders;
pub mod payments;
pub mod products;

pub(crate) mod rows;
