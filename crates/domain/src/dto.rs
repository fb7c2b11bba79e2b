//! Transport-facing read views, constructed fresh per response.

use chrono::{DateTime, Utc};
use common::OrderId;
use order_store::{Order, OrderSummary};
use serde::{Deserialize, Serialize};

/// Full order view returned by creates and single-order lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: OrderId,
    pub first_name: String,
    pub last_name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub total_cost_cents: i64,
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            first_name: order.first_name.clone(),
            last_name: order.last_name.clone(),
            status: order.status.clone(),
            created_at: order.created_at,
            total_cost_cents: order.total_cost.cents(),
        }
    }
}

impl From<&OrderSummary> for OrderDto {
    fn from(summary: &OrderSummary) -> Self {
        Self {
            id: summary.id,
            first_name: summary.first_name.clone(),
            last_name: summary.last_name.clone(),
            status: summary.status.clone(),
            created_at: summary.created_at,
            total_cost_cents: summary.total_cost.cents(),
        }
    }
}

/// Condensed listing view with the derived display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummaryDto {
    pub id: OrderId,
    pub full_name: String,
    pub status: String,
    pub total_cost_cents: i64,
}

impl From<&OrderSummary> for OrderSummaryDto {
    fn from(summary: &OrderSummary) -> Self {
        Self {
            id: summary.id,
            full_name: summary.full_name(),
            status: summary.status.clone(),
            total_cost_cents: summary.total_cost.cents(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Money;

    fn summary() -> OrderSummary {
        OrderSummary {
            id: OrderId::new(1),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            status: "Created".to_string(),
            total_cost: Money::from_cents(15000),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn summary_dto_derives_full_name() {
        let dto = OrderSummaryDto::from(&summary());
        assert_eq!(dto.full_name, "Ada Lovelace");
        assert_eq!(dto.total_cost_cents, 15000);
    }

    #[test]
    fn order_dto_from_summary_keeps_projection_status() {
        let dto = OrderDto::from(&summary());
        assert_eq!(dto.status, "Created");
        assert_eq!(dto.first_name, "Ada");
    }
}
