use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use common::OrderId;
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::order::{NewOrder, Order};
use crate::read::ReadStore;
use crate::summary::OrderSummary;
use crate::write::WriteStore;

/// In-memory write store implementation for testing and local development.
///
/// Assigns sequential ids starting at 1, matching the PostgreSQL
/// implementation's identity column. The offline switch lets tests exercise
/// store-failure paths without a database.
#[derive(Clone)]
pub struct InMemoryWriteStore {
    orders: Arc<RwLock<BTreeMap<OrderId, Order>>>,
    next_id: Arc<AtomicI64>,
    offline: Arc<AtomicBool>,
}

impl InMemoryWriteStore {
    /// Creates a new empty in-memory write store.
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the total number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Switches the store on or off; operations fail while offline.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write store offline".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemoryWriteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WriteStore for InMemoryWriteStore {
    async fn add_order(&self, order: NewOrder) -> Result<Order> {
        self.ensure_online()?;

        let id = OrderId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let order = order.into_order(id);

        self.orders.write().await.insert(id, order.clone());

        Ok(order)
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        self.ensure_online()?;
        Ok(self.orders.read().await.get(&id).cloned())
    }
}

/// In-memory read store implementation for testing and local development.
#[derive(Clone)]
pub struct InMemoryReadStore {
    summaries: Arc<RwLock<BTreeMap<OrderId, OrderSummary>>>,
    offline: Arc<AtomicBool>,
}

impl InMemoryReadStore {
    /// Creates a new empty in-memory read store.
    pub fn new() -> Self {
        Self {
            summaries: Arc::new(RwLock::new(BTreeMap::new())),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the total number of summaries stored.
    pub async fn summary_count(&self) -> usize {
        self.summaries.read().await.len()
    }

    /// Switches the store on or off; operations fail while offline.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("read store offline".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemoryReadStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadStore for InMemoryReadStore {
    async fn upsert_summary(&self, summary: OrderSummary) -> Result<()> {
        self.ensure_online()?;
        self.summaries.write().await.insert(summary.id, summary);
        Ok(())
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<OrderSummary>> {
        self.ensure_online()?;
        Ok(self.summaries.read().await.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<OrderSummary>> {
        self.ensure_online()?;
        // BTreeMap iteration is ordered by id, so snapshots are stable.
        Ok(self.summaries.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::Money;

    fn new_order(first: &str, last: &str) -> NewOrder {
        NewOrder {
            first_name: first.to_string(),
            last_name: last.to_string(),
            status: "New".to_string(),
            total_cost: Money::from_cents(15000),
            created_at: Utc::now(),
        }
    }

    fn summary(id: i64, status: &str) -> OrderSummary {
        OrderSummary {
            id: OrderId::new(id),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            status: status.to_string(),
            total_cost: Money::from_cents(15000),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn add_order_assigns_sequential_ids() {
        let store = InMemoryWriteStore::new();

        let first = store.add_order(new_order("Ada", "Lovelace")).await.unwrap();
        let second = store.add_order(new_order("Alan", "Turing")).await.unwrap();

        assert_eq!(first.id, OrderId::new(1));
        assert_eq!(second.id, OrderId::new(2));
        assert_eq!(store.order_count().await, 2);
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown_order() {
        let store = InMemoryWriteStore::new();
        assert!(store.find_by_id(OrderId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn offline_write_store_fails_without_mutating() {
        let store = InMemoryWriteStore::new();
        store.set_offline(true);

        let err = store.add_order(new_order("Ada", "Lovelace")).await;
        assert!(matches!(err, Err(StoreError::Unavailable(_))));

        store.set_offline(false);
        assert_eq!(store.order_count().await, 0);
    }

    #[tokio::test]
    async fn upsert_replaces_the_row_for_the_same_id() {
        let store = InMemoryReadStore::new();

        store.upsert_summary(summary(1, "Created")).await.unwrap();
        store.upsert_summary(summary(1, "Shipped")).await.unwrap();

        assert_eq!(store.summary_count().await, 1);
        let row = store.find_by_id(OrderId::new(1)).await.unwrap().unwrap();
        assert_eq!(row.status, "Shipped");
    }

    #[tokio::test]
    async fn list_all_iterates_in_id_order() {
        let store = InMemoryReadStore::new();

        store.upsert_summary(summary(3, "Created")).await.unwrap();
        store.upsert_summary(summary(1, "Created")).await.unwrap();
        store.upsert_summary(summary(2, "Created")).await.unwrap();

        let ids: Vec<i64> = store
            .list_all()
            .await
            .unwrap()
            .iter()
            .map(|s| s.id.as_i64())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn offline_read_store_fails_lookups() {
        let store = InMemoryReadStore::new();
        store.upsert_summary(summary(1, "Created")).await.unwrap();
        store.set_offline(true);

        assert!(store.find_by_id(OrderId::new(1)).await.is_err());
        assert!(store.list_all().await.is_err());
    }
}
