mod orders;
mod stock;

pub(crate) use orders::{OrderInsert, PgOrdersRepository};
pub(crate) use stock::PgOrderStockRepository;
