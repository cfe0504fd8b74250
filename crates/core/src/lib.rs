//! Storefront pricing
//!
//! Pure cart, coupon and order-total calculations shared by the storefront
//! services. Every amount is expressed in minor units of the store currency
//! (cents for USD), so all arithmetic here is integer arithmetic apart from
//! percentage application, which goes through [`rust_decimal`].

pub mod coupons;
pub mod money;
pub mod orders;
pub mod pricing;
pub mod totals;
