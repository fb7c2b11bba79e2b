//! Write and read stores for the order-management service.
//!
//! The write store owns the authoritative [`Order`] entity; the read store
//! owns the denormalized [`OrderSummary`] projection rows. The two stores
//! are independently configured and never consulted by the other side:
//! consistency between them is maintained only through event delivery.
//!
//! Both sides ship an in-memory implementation (tests, local development)
//! and a PostgreSQL implementation with the same interface.

pub mod error;
pub mod memory;
pub mod order;
pub mod postgres;
pub mod read;
pub mod summary;
pub mod write;

pub use error::{Result, StoreError};
pub use memory::{InMemoryReadStore, InMemoryWriteStore};
pub use order::{NewOrder, Order};
pub use postgres::{PostgresReadStore, PostgresWriteStore};
pub use read::ReadStore;
pub use summary::OrderSummary;
pub use write::WriteStore;
