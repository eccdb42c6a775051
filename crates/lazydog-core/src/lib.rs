//! Core types and consistency rules for the Lazydog content catalog.
//!
//! This crate is deliberately free of HTTP and database dependencies. Storage
//! backends implement [`store::CatalogStore`]; transports call the operations
//! on [`catalog::Catalog`].

pub mod actor;
pub mod aggregate;
pub mod authz;
pub mod catalog;
pub mod error;
pub mod feedback;
pub mod guard;
pub mod moderation;
pub mod normalize;
pub mod resource;
pub mod slug;
pub mod store;
pub mod taxonomy;

pub use catalog::Catalog;
pub use error::{Error, Result};
