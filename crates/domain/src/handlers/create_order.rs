//! CreateOrder command handler.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mediator::{CommandHandler, DispatchError, EventBus};
use order_store::{NewOrder, WriteStore};

use crate::commands::CreateOrder;
use crate::dto::OrderDto;
use crate::events::OrderCreated;
use crate::validation::Validate;

/// Validates, persists the order to the write store, and publishes
/// [`OrderCreated`].
///
/// The write and the publish are two separate units of work: a subscriber
/// failure propagates out of this handler even though the write already
/// committed, leaving the read model behind until recovery.
pub struct CreateOrderHandler<W: WriteStore + ?Sized> {
    store: Arc<W>,
    bus: Arc<EventBus>,
}

impl<W: WriteStore + ?Sized> CreateOrderHandler<W> {
    /// Creates a new handler backed by the given write store and bus.
    pub fn new(store: Arc<W>, bus: Arc<EventBus>) -> Self {
        Self { store, bus }
    }
}

#[async_trait]
impl<W> CommandHandler<CreateOrder> for CreateOrderHandler<W>
where
    W: WriteStore + ?Sized + 'static,
{
    #[tracing::instrument(skip(self, command))]
    async fn handle(&self, command: CreateOrder) -> Result<OrderDto, DispatchError> {
        let violations = command.validate();
        if !violations.is_empty() {
            tracing::debug!(count = violations.len(), "create order rejected");
            return Err(DispatchError::Validation(violations));
        }

        let order = self
            .store
            .add_order(NewOrder {
                first_name: command.first_name,
                last_name: command.last_name,
                status: command.status,
                total_cost: command.total_cost,
                created_at: Utc::now(),
            })
            .await
            .map_err(DispatchError::store)?;

        metrics::counter!("orders_created").increment(1);
        tracing::info!(order_id = %order.id, "order persisted");

        let event = OrderCreated::from_order(&order);
        self.bus.publish(&event).await?;

        Ok(OrderDto::from(&order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Money;
    use order_store::InMemoryWriteStore;

    fn handler_with(
        store: Arc<InMemoryWriteStore>,
        bus: EventBus,
    ) -> CreateOrderHandler<InMemoryWriteStore> {
        CreateOrderHandler::new(store, Arc::new(bus))
    }

    #[tokio::test]
    async fn invalid_command_fails_without_touching_the_store() {
        let store = Arc::new(InMemoryWriteStore::new());
        let handler = handler_with(Arc::clone(&store), EventBus::builder().build());

        let command = CreateOrder::new("Ada", "Lovelace", "New", Money::zero());
        let err = handler.handle(command).await.unwrap_err();

        match err {
            DispatchError::Validation(violations) => {
                assert!(violations.mentions("total_cost"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.order_count().await, 0);
    }

    #[tokio::test]
    async fn valid_command_persists_and_returns_the_dto() {
        let store = Arc::new(InMemoryWriteStore::new());
        let handler = handler_with(Arc::clone(&store), EventBus::builder().build());

        let command = CreateOrder::new("Ada", "Lovelace", "New", Money::from_cents(15000));
        let dto = handler.handle(command).await.unwrap();

        assert_eq!(dto.id.as_i64(), 1);
        assert_eq!(dto.first_name, "Ada");
        assert_eq!(dto.status, "New");
        assert_eq!(dto.total_cost_cents, 15000);
        assert_eq!(store.order_count().await, 1);
    }

    #[tokio::test]
    async fn offline_store_surfaces_a_store_error() {
        let store = Arc::new(InMemoryWriteStore::new());
        store.set_offline(true);
        let handler = handler_with(Arc::clone(&store), EventBus::builder().build());

        let command = CreateOrder::new("Ada", "Lovelace", "New", Money::from_cents(15000));
        let err = handler.handle(command).await.unwrap_err();

        assert!(matches!(err, DispatchError::Store(_)));
    }
}
