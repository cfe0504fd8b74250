//! Storefront domain services over PostgreSQL.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod pagination;

#[cfg(test)]
mod test;

pub mod uuids;
