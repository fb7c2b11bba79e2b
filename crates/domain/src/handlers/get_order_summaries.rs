//! GetOrderSummaries query handler.

use std::sync::Arc;

use async_trait::async_trait;
use mediator::{DispatchError, QueryHandler};
use order_store::ReadStore;

use crate::dto::OrderSummaryDto;
use crate::queries::GetOrderSummaries;

/// Returns a snapshot of every order summary in the read store.
pub struct GetOrderSummariesHandler<R: ReadStore + ?Sized> {
    store: Arc<R>,
}

impl<R: ReadStore + ?Sized> GetOrderSummariesHandler<R> {
    /// Creates a new handler backed by the given read store.
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<R> QueryHandler<GetOrderSummaries> for GetOrderSummariesHandler<R>
where
    R: ReadStore + ?Sized + 'static,
{
    #[tracing::instrument(skip(self, _query))]
    async fn handle(&self, _query: GetOrderSummaries) -> Result<Vec<OrderSummaryDto>, DispatchError> {
        let summaries = self
            .store
            .list_all()
            .await
            .map_err(DispatchError::store)?;

        Ok(summaries.iter().map(OrderSummaryDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::{Money, OrderId};
    use order_store::{InMemoryReadStore, OrderSummary};

    fn summary(id: i64, first: &str, last: &str) -> OrderSummary {
        OrderSummary {
            id: OrderId::new(id),
            first_name: first.to_string(),
            last_name: last.to_string(),
            status: "Created".to_string(),
            total_cost: Money::from_cents(15000),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn empty_store_yields_an_empty_snapshot() {
        let handler = GetOrderSummariesHandler::new(Arc::new(InMemoryReadStore::new()));

        let result = handler.handle(GetOrderSummaries).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn snapshot_contains_every_summary_with_derived_names() {
        let store = Arc::new(InMemoryReadStore::new());
        store
            .upsert_summary(summary(1, "Ada", "Lovelace"))
            .await
            .unwrap();
        store
            .upsert_summary(summary(2, "Alan", "Turing"))
            .await
            .unwrap();
        let handler = GetOrderSummariesHandler::new(store);

        let result = handler.handle(GetOrderSummaries).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].full_name, "Ada Lovelace");
        assert_eq!(result[1].full_name, "Alan Turing");
    }
}
