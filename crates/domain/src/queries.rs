//! Order queries.

use common::OrderId;
use mediator::Query;

use crate::dto::{OrderDto, OrderSummaryDto};

/// Query for a single order by id.
///
/// A missing id resolves to `None`; only store access can fail.
#[derive(Debug, Clone)]
pub struct GetOrderById {
    /// The order to look up.
    pub order_id: OrderId,
}

impl GetOrderById {
    /// Creates a new GetOrderById query.
    pub fn new(order_id: impl Into<OrderId>) -> Self {
        Self {
            order_id: order_id.into(),
        }
    }
}

impl Query for GetOrderById {
    type Output = Option<OrderDto>;
}

/// Query for a snapshot of all order summaries.
#[derive(Debug, Clone, Default)]
pub struct GetOrderSummaries;

impl Query for GetOrderSummaries {
    type Output = Vec<OrderSummaryDto>;
}
