mod applied_coupons;
mod items;
mod stock;

pub(crate) use applied_coupons::PgAppliedCouponsRepository;
pub(crate) use items::{LineValues, PgCartItemsRepository};
pub(crate) use stock::{PgStockRepository, StockSelection};
