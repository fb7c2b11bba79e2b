//! In-process command/query dispatch and event publication.
//!
//! This crate provides the routing core of the service:
//! - [`Command`] and [`Query`] traits with single-handler routing via the
//!   [`Mediator`] registry, keyed by request type
//! - [`Event`] and [`EventHandler`] traits with zero-or-more-subscriber
//!   fan-out via the [`EventBus`]
//! - The error taxonomy shared by every handler ([`DispatchError`]),
//!   plus registration-time ([`RegistryError`]) and publication-time
//!   ([`PublishError`]) failures
//!
//! Both the mediator and the bus are assembled through builders and frozen
//! at startup; routing tables never change while requests are in flight.

pub mod bus;
pub mod error;
pub mod registry;
pub mod request;

pub use bus::{Event, EventBus, EventBusBuilder, EventHandler};
pub use error::{BoxError, DispatchError, PublishError, RegistryError};
pub use registry::{Mediator, MediatorBuilder};
pub use request::{Command, CommandHandler, Query, QueryHandler};
