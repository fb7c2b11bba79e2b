//! Write-side order entity.

use chrono::{DateTime, Utc};
use common::{Money, OrderId};
use serde::{Deserialize, Serialize};

/// The authoritative order entity, owned exclusively by the write store.
///
/// Created only by a command handler; the `id` is assigned by the write
/// store on creation and is immutable thereafter, as is `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub first_name: String,
    pub last_name: String,
    pub status: String,
    pub total_cost: Money,
    pub created_at: DateTime<Utc>,
}

/// An order awaiting persistence; the write store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub first_name: String,
    pub last_name: String,
    pub status: String,
    pub total_cost: Money,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    /// Attaches a store-assigned id, producing the persisted entity.
    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            status: self.status,
            total_cost: self.total_cost,
            created_at: self.created_at,
        }
    }
}
