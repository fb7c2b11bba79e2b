//! Dispatch, registration, and publication error types.

use common::Violations;
use thiserror::Error;

/// Boxed error used where subscriber and store failures cross the
/// type-erased dispatch boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by command and query dispatch.
///
/// Validation is an expected, modeled outcome; store and projection
/// failures are unexpected-path failures surfaced up the call stack
/// unmodified.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Field-level validation rejected the request. No store was mutated.
    #[error("validation failed: {0}")]
    Validation(Violations),

    /// The backing store failed while executing the request.
    #[error("store unavailable: {0}")]
    Store(#[source] BoxError),

    /// A subscriber failed during event publication. The write that produced
    /// the event already committed; the read model lags until recovery.
    #[error("projection '{subscriber}' failed: {source}")]
    Projection {
        subscriber: &'static str,
        #[source]
        source: BoxError,
    },

    /// No handler is registered for the dispatched request type. Startup
    /// verification makes this unreachable in a correctly wired process.
    #[error("no handler registered for {request}")]
    Unrouted { request: &'static str },
}

impl DispatchError {
    /// Creates a validation error from a set of violations.
    pub fn validation(violations: impl Into<Violations>) -> Self {
        Self::Validation(violations.into())
    }

    /// Creates a store error from any underlying store failure.
    pub fn store(source: impl Into<BoxError>) -> Self {
        Self::Store(source.into())
    }
}

/// Handler registration errors, detected while wiring the process.
///
/// These are configuration failures: fatal at startup, never per-request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A second handler was registered for an already-routed request type.
    #[error("duplicate handler registered for {request}")]
    DuplicateHandler { request: &'static str },

    /// A request type the process dispatches has no registered handler.
    #[error("no handler registered for {request}")]
    MissingHandler { request: &'static str },
}

/// A subscriber failure raised during [`EventBus::publish`].
///
/// Publication stops at the first failing subscriber and the failure
/// propagates to the publisher.
///
/// [`EventBus::publish`]: crate::bus::EventBus::publish
#[derive(Debug, Error)]
#[error("subscriber '{subscriber}' failed handling {event_type}: {source}")]
pub struct PublishError {
    /// Name of the failing subscriber.
    pub subscriber: &'static str,
    /// Type name of the event being delivered.
    pub event_type: &'static str,
    #[source]
    pub source: BoxError,
}

impl From<PublishError> for DispatchError {
    fn from(err: PublishError) -> Self {
        DispatchError::Projection {
            subscriber: err.subscriber,
            source: err.source,
        }
    }
}
