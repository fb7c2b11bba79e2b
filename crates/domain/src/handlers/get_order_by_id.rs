//! GetOrderById query handler.

use std::sync::Arc;

use async_trait::async_trait;
use mediator::{DispatchError, QueryHandler};
use order_store::ReadStore;

use crate::dto::OrderDto;
use crate::queries::GetOrderById;

/// Looks up a single order in the read store.
///
/// A missing id resolves to `None` for the transport layer to translate;
/// only store access surfaces as an error.
pub struct GetOrderByIdHandler<R: ReadStore + ?Sized> {
    store: Arc<R>,
}

impl<R: ReadStore + ?Sized> GetOrderByIdHandler<R> {
    /// Creates a new handler backed by the given read store.
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<R> QueryHandler<GetOrderById> for GetOrderByIdHandler<R>
where
    R: ReadStore + ?Sized + 'static,
{
    #[tracing::instrument(skip(self), fields(order_id = %query.order_id))]
    async fn handle(&self, query: GetOrderById) -> Result<Option<OrderDto>, DispatchError> {
        let summary = self
            .store
            .find_by_id(query.order_id)
            .await
            .map_err(DispatchError::store)?;

        Ok(summary.as_ref().map(OrderDto::from))
    }
}
