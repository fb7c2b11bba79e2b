//! Order commands.

use common::Money;
use mediator::Command;

use crate::dto::OrderDto;

/// Command to create a new order.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    /// First name of the customer placing the order.
    pub first_name: String,

    /// Last name of the customer placing the order.
    pub last_name: String,

    /// Initial status requested by the caller.
    pub status: String,

    /// Total cost of the order; must be greater than zero.
    pub total_cost: Money,
}

impl CreateOrder {
    /// Creates a new CreateOrder command.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        status: impl Into<String>,
        total_cost: Money,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            status: status.into(),
            total_cost,
        }
    }
}

impl Command for CreateOrder {
    type Output = OrderDto;
}
