//! Domain layer for the order-management service.
//!
//! This crate provides the write- and read-side request types and their
//! handlers:
//! - [`CreateOrder`] command with its field-level validation rules
//! - [`GetOrderById`] and [`GetOrderSummaries`] queries
//! - [`OrderCreated`] domain event
//! - Transport-facing DTOs, constructed fresh per response

pub mod commands;
pub mod dto;
pub mod events;
pub mod handlers;
pub mod queries;
pub mod validation;

pub use commands::CreateOrder;
pub use dto::{OrderDto, OrderSummaryDto};
pub use events::OrderCreated;
pub use handlers::{CreateOrderHandler, GetOrderByIdHandler, GetOrderSummariesHandler};
pub use queries::{GetOrderById, GetOrderSummaries};
pub use validation::Validate;
