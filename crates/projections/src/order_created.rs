//! Projection of [`OrderCreated`] events into order summaries.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use domain::OrderCreated;
use mediator::{BoxError, EventHandler};
use order_store::{OrderSummary, ReadStore};

/// Maintains the read-side summary rows from [`OrderCreated`] events.
///
/// The summary's `status` is hard-set to `"Created"` regardless of the
/// status the original command carried, and `created_at` is stamped at
/// processing time, not the order's creation time. Rows are upserted by
/// order id, so re-delivery of an event leaves a single row.
pub struct OrderCreatedProjection<R: ReadStore + ?Sized> {
    store: Arc<R>,
}

impl<R: ReadStore + ?Sized> OrderCreatedProjection<R> {
    /// Creates a new projection writing to the given read store.
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<R> EventHandler<OrderCreated> for OrderCreatedProjection<R>
where
    R: ReadStore + ?Sized + 'static,
{
    fn name(&self) -> &'static str {
        "OrderCreatedProjection"
    }

    #[tracing::instrument(skip(self, event), fields(order_id = %event.order_id))]
    async fn handle(&self, event: &OrderCreated) -> Result<(), BoxError> {
        let summary = OrderSummary {
            id: event.order_id,
            first_name: event.first_name.clone(),
            last_name: event.last_name.clone(),
            status: "Created".to_string(),
            total_cost: event.total_cost,
            created_at: Utc::now(),
        };

        self.store.upsert_summary(summary).await?;

        metrics::counter!("projections_events_processed").increment(1);
        tracing::debug!("order summary projected");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Money, OrderId};
    use order_store::InMemoryReadStore;

    fn event() -> OrderCreated {
        OrderCreated {
            order_id: OrderId::new(1),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            total_cost: Money::from_cents(15000),
        }
    }

    #[tokio::test]
    async fn projects_a_summary_with_created_status() {
        let store = Arc::new(InMemoryReadStore::new());
        let projection = OrderCreatedProjection::new(Arc::clone(&store));

        projection.handle(&event()).await.unwrap();

        let summary = store.find_by_id(OrderId::new(1)).await.unwrap().unwrap();
        assert_eq!(summary.status, "Created");
        assert_eq!(summary.full_name(), "Ada Lovelace");
        assert_eq!(summary.total_cost, Money::from_cents(15000));
    }

    #[tokio::test]
    async fn redelivery_leaves_a_single_row() {
        let store = Arc::new(InMemoryReadStore::new());
        let projection = OrderCreatedProjection::new(Arc::clone(&store));

        projection.handle(&event()).await.unwrap();
        projection.handle(&event()).await.unwrap();

        assert_eq!(store.summary_count().await, 1);
    }

    #[tokio::test]
    async fn offline_read_store_fails_the_projection() {
        let store = Arc::new(InMemoryReadStore::new());
        store.set_offline(true);
        let projection = OrderCreatedProjection::new(Arc::clone(&store));

        assert!(projection.handle(&event()).await.is_err());
    }
}
