//! Write store contract.

use async_trait::async_trait;
use common::OrderId;

use crate::error::Result;
use crate::order::{NewOrder, Order};

/// Store owning the authoritative [`Order`] entities.
///
/// Commands mutate only this store. Each operation is its own atomic unit
/// of work on a scoped connection; nothing is shared across concurrent
/// requests. Failures surface as [`StoreError`] and are not retried.
///
/// [`StoreError`]: crate::error::StoreError
#[async_trait]
pub trait WriteStore: Send + Sync {
    /// Persists a new order and commits, returning the entity with its
    /// store-assigned id.
    async fn add_order(&self, order: NewOrder) -> Result<Order>;

    /// Looks up an order by id on the write side.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>>;
}
