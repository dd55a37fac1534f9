//! Access to the external content store.
//!
//! Everything above this crate talks to [`Repository`]; the store behind it is
//! either the hosted content API ([`HttpContentStore`]) or an in-process stand-in
//! ([`InMemoryContentStore`]) for tests and local runs.

pub mod error;
pub mod http;
pub mod in_memory;
pub mod repository;
pub mod store;

pub use error::StoreError;
pub use http::{HttpContentStore, HttpStoreSettings};
pub use in_memory::InMemoryContentStore;
pub use repository::Repository;
pub use store::{ContentStore, DocumentQuery};
