//! Read store contract.

use async_trait::async_trait;
use common::OrderId;

use crate::error::Result;
use crate::summary::OrderSummary;

/// Store owning the denormalized [`OrderSummary`] rows.
///
/// Queries read only from this store; only projection handlers write to it.
#[async_trait]
pub trait ReadStore: Send + Sync {
    /// Inserts or replaces the summary keyed by its order id and commits.
    ///
    /// Upsert semantics make event re-delivery safe: projecting the same
    /// event twice leaves a single row.
    async fn upsert_summary(&self, summary: OrderSummary) -> Result<()>;

    /// Looks up a summary by order id. A missing id is `None`, not an error.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<OrderSummary>>;

    /// Returns a snapshot of all summaries, stable iteration order per call.
    async fn list_all(&self) -> Result<Vec<OrderSummary>>;
}
