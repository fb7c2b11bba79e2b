//! Read-model projections for the CQRS query side.
//!
//! Projection handlers subscribe to domain events on the bus and keep the
//! read store eventually consistent with the write store. They are the
//! only writers of the read side.

pub mod order_created;

pub use order_created::OrderCreatedProjection;
