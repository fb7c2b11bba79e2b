//! Request traits for the two dispatch capability sets.

use async_trait::async_trait;

use crate::error::DispatchError;

/// A state-changing request with a single logical effect.
///
/// Exactly one handler is registered per concrete command type. A command
/// either returns its output DTO or fails with a [`DispatchError`].
pub trait Command: Send + 'static {
    /// The value a successful dispatch returns.
    type Output: Send + 'static;
}

/// Handler for a single command type.
///
/// Command handlers validate, mutate the write store, and emit domain
/// events; they are the only components allowed to mutate the write side.
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, command: C) -> Result<C::Output, DispatchError>;
}

/// A read-only request resolved against the read side.
///
/// Exactly one handler is registered per concrete query type. A missing
/// entity is a modeled outcome (`Option::None` in the output), not an error.
pub trait Query: Send + 'static {
    /// The value a successful dispatch returns.
    type Output: Send + 'static;
}

/// Handler for a single query type. Must have no side effects.
#[async_trait]
pub trait QueryHandler<Q: Query>: Send + Sync {
    async fn handle(&self, query: Q) -> Result<Q::Output, DispatchError>;
}
