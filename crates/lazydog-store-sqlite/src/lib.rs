//! SQLite backend for the Lazydog catalog.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Each [`CatalogStore::transact`] call
//! becomes one `BEGIN IMMEDIATE` transaction on that thread.
//!
//! [`CatalogStore::transact`]: lazydog_core::store::CatalogStore::transact

mod encode;
mod schema;
mod store;
mod unit;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
