//! Order domain events.

use common::{Money, OrderId};
use mediator::Event;
use order_store::Order;
use serde::{Deserialize, Serialize};

/// Published exactly once per successful order creation.
///
/// Carries the persisted order's assigned id and the command's input
/// fields, but no status and no creation timestamp: subscribers derive
/// the read-side status and stamp their own processing time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreated {
    pub order_id: OrderId,
    pub first_name: String,
    pub last_name: String,
    pub total_cost: Money,
}

impl OrderCreated {
    /// Builds the event from the persisted order.
    pub fn from_order(order: &Order) -> Self {
        Self {
            order_id: order.id,
            first_name: order.first_name.clone(),
            last_name: order.last_name.clone(),
            total_cost: order.total_cost,
        }
    }
}

impl Event for OrderCreated {
    fn event_type(&self) -> &'static str {
        "OrderCreated"
    }
}
