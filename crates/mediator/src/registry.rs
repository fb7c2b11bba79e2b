//! Typed request routing table.
//!
//! The mediator is a pure routing table keyed by request type identity.
//! Handlers are registered once through [`MediatorBuilder`]; the built
//! [`Mediator`] is immutable, so the routing table cannot change while
//! requests are in flight.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use crate::error::{DispatchError, RegistryError};
use crate::request::{Command, CommandHandler, Query, QueryHandler};

/// Returns the unqualified name of a request type, for diagnostics.
fn request_name<T: 'static>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// A registered handler, stored type-erased and recovered by downcast.
struct Registered {
    request: &'static str,
    handler: Box<dyn Any + Send + Sync>,
}

/// Builder assembling the routing table at startup.
///
/// Registering a second handler for a request type fails immediately with
/// [`RegistryError::DuplicateHandler`]; completeness is asserted on the
/// built mediator via [`Mediator::ensure_command`] / [`Mediator::ensure_query`].
#[derive(Default)]
pub struct MediatorBuilder {
    commands: HashMap<TypeId, Registered>,
    queries: HashMap<TypeId, Registered>,
}

impl MediatorBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the single handler for command type `C`.
    pub fn register_command<C, H>(mut self, handler: H) -> Result<Self, RegistryError>
    where
        C: Command,
        H: CommandHandler<C> + 'static,
    {
        match self.commands.entry(TypeId::of::<C>()) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateHandler {
                request: request_name::<C>(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(Registered {
                    request: request_name::<C>(),
                    handler: Box::new(Arc::new(handler) as Arc<dyn CommandHandler<C>>),
                });
                Ok(self)
            }
        }
    }

    /// Registers the single handler for query type `Q`.
    pub fn register_query<Q, H>(mut self, handler: H) -> Result<Self, RegistryError>
    where
        Q: Query,
        H: QueryHandler<Q> + 'static,
    {
        match self.queries.entry(TypeId::of::<Q>()) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateHandler {
                request: request_name::<Q>(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(Registered {
                    request: request_name::<Q>(),
                    handler: Box::new(Arc::new(handler) as Arc<dyn QueryHandler<Q>>),
                });
                Ok(self)
            }
        }
    }

    /// Freezes the routing table.
    pub fn build(self) -> Mediator {
        tracing::info!(
            commands = self.commands.len(),
            queries = self.queries.len(),
            "mediator routing table built"
        );

        Mediator {
            commands: self.commands,
            queries: self.queries,
        }
    }
}

/// Single entry point routing each request to its one registered handler.
///
/// The mediator performs no business logic; it resolves the handler by the
/// request's type identity and invokes it, returning the handler's result
/// or propagating its failure.
pub struct Mediator {
    commands: HashMap<TypeId, Registered>,
    queries: HashMap<TypeId, Registered>,
}

impl Mediator {
    /// Returns a builder for assembling the routing table.
    pub fn builder() -> MediatorBuilder {
        MediatorBuilder::new()
    }

    /// Dispatches a command to its registered handler.
    pub async fn send<C: Command>(&self, command: C) -> Result<C::Output, DispatchError> {
        let handler = Self::resolve::<C, dyn CommandHandler<C>>(&self.commands)?;
        metrics::counter!("mediator_commands_dispatched").increment(1);
        tracing::debug!(request = request_name::<C>(), "dispatching command");
        handler.handle(command).await
    }

    /// Dispatches a query to its registered handler.
    pub async fn query<Q: Query>(&self, query: Q) -> Result<Q::Output, DispatchError> {
        let handler = Self::resolve::<Q, dyn QueryHandler<Q>>(&self.queries)?;
        metrics::counter!("mediator_queries_dispatched").increment(1);
        tracing::debug!(request = request_name::<Q>(), "dispatching query");
        handler.handle(query).await
    }

    /// Asserts at startup that command type `C` is routed.
    pub fn ensure_command<C: Command>(&self) -> Result<(), RegistryError> {
        self.commands
            .get(&TypeId::of::<C>())
            .map(|_| ())
            .ok_or(RegistryError::MissingHandler {
                request: request_name::<C>(),
            })
    }

    /// Asserts at startup that query type `Q` is routed.
    pub fn ensure_query<Q: Query>(&self) -> Result<(), RegistryError> {
        self.queries
            .get(&TypeId::of::<Q>())
            .map(|_| ())
            .ok_or(RegistryError::MissingHandler {
                request: request_name::<Q>(),
            })
    }

    /// Number of routed command types.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Number of routed query types.
    pub fn query_count(&self) -> usize {
        self.queries.len()
    }

    fn resolve<R: 'static, H: ?Sized + 'static>(
        table: &HashMap<TypeId, Registered>,
    ) -> Result<&Arc<H>, DispatchError> {
        let entry = table
            .get(&TypeId::of::<R>())
            .ok_or(DispatchError::Unrouted {
                request: request_name::<R>(),
            })?;

        // The table is keyed by request TypeId, so the stored handler is
        // always Arc<dyn ...Handler<R>>; a mismatch would be a registry bug.
        entry
            .handler
            .downcast_ref::<Arc<H>>()
            .ok_or(DispatchError::Unrouted {
                request: entry.request,
            })
    }
}
