//! Read-side order summary row.

use chrono::{DateTime, Utc};
use common::{Money, OrderId};
use serde::{Deserialize, Serialize};

/// Denormalized query-optimized row, owned exclusively by the read store.
///
/// Created only by a projection handler reacting to a domain event. The
/// `id` is a foreign reference to the originating order, not independently
/// generated; `created_at` is the projection's own processing stamp. The
/// row may lag behind the write side and is never the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub first_name: String,
    pub last_name: String,
    pub status: String,
    pub total_cost: Money,
    pub created_at: DateTime<Utc>,
}

impl OrderSummary {
    /// Derives the display name from the stored name parts.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
