//! In-process publish/subscribe event routing.
//!
//! The bus is the sole mechanism binding the write side to the read side:
//! there is no polling and no background sync. Delivery is synchronous on
//! the publisher's execution context, in registration order, so a command's
//! unit of work does not complete until every subscriber has run. The
//! abstraction boundary is the [`EventBus`] type itself; a durable or
//! asynchronous transport can replace it without touching handler logic.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::error::{BoxError, PublishError};

/// A domain event: an immutable fact, named in past tense, produced by a
/// command handler after its write commits.
pub trait Event: Send + Sync + Clone + 'static {
    /// Returns the event type name, used for routing diagnostics and metrics.
    fn event_type(&self) -> &'static str;
}

/// A subscriber handling one event type.
///
/// Zero or more subscribers may be registered per event type. A subscriber
/// failure propagates out of [`EventBus::publish`] to the publisher.
#[async_trait]
pub trait EventHandler<E: Event>: Send + Sync {
    /// Returns the subscriber name, used in failure reports and logs.
    fn name(&self) -> &'static str;

    /// Handles a single event instance.
    async fn handle(&self, event: &E) -> Result<(), BoxError>;
}

/// Type-erased subscriber entry; recovered by downcasting the event.
trait ErasedSubscriber: Send + Sync {
    fn name(&self) -> &'static str;

    fn invoke<'a>(
        &'a self,
        event: &'a (dyn Any + Send + Sync),
    ) -> BoxFuture<'a, Result<(), BoxError>>;
}

struct Subscriber<E, H> {
    handler: H,
    _event: PhantomData<fn(&E)>,
}

impl<E, H> ErasedSubscriber for Subscriber<E, H>
where
    E: Event,
    H: EventHandler<E>,
{
    fn name(&self) -> &'static str {
        self.handler.name()
    }

    fn invoke<'a>(
        &'a self,
        event: &'a (dyn Any + Send + Sync),
    ) -> BoxFuture<'a, Result<(), BoxError>> {
        match event.downcast_ref::<E>() {
            Some(event) => self.handler.handle(event),
            // Subscriptions are keyed by event TypeId, so a mismatch cannot
            // occur; delivering nothing is the safe answer if it ever did.
            None => Box::pin(async { Ok(()) }),
        }
    }
}

/// Builder assembling the subscription table at startup.
#[derive(Default)]
pub struct EventBusBuilder {
    subscribers: HashMap<TypeId, Vec<Box<dyn ErasedSubscriber>>>,
}

impl EventBusBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a handler to event type `E`.
    ///
    /// Subscribers are invoked in the order they were registered.
    pub fn subscribe<E, H>(mut self, handler: H) -> Self
    where
        E: Event,
        H: EventHandler<E> + 'static,
    {
        self.subscribers
            .entry(TypeId::of::<E>())
            .or_default()
            .push(Box::new(Subscriber::<E, H> {
                handler,
                _event: PhantomData,
            }));
        self
    }

    /// Freezes the subscription table.
    ///
    /// The built bus is immutable, so no handler can unsubscribe (or be
    /// added) mid-publish.
    pub fn build(self) -> EventBus {
        tracing::info!(
            event_types = self.subscribers.len(),
            "event bus subscription table built"
        );

        EventBus {
            subscribers: self.subscribers,
        }
    }
}

/// In-process event router delivering each published event to every
/// subscriber registered for its exact type.
pub struct EventBus {
    subscribers: HashMap<TypeId, Vec<Box<dyn ErasedSubscriber>>>,
}

impl EventBus {
    /// Returns a builder for assembling the subscription table.
    pub fn builder() -> EventBusBuilder {
        EventBusBuilder::new()
    }

    /// Publishes an event to all subscribers of its type, synchronously and
    /// in registration order.
    ///
    /// Returns only after every subscriber has completed. Publication stops
    /// at the first subscriber failure, which propagates to the publisher.
    /// Publishing with zero subscribers is a successful no-op.
    #[tracing::instrument(skip(self, event), fields(event_type = event.event_type()))]
    pub async fn publish<E: Event>(&self, event: &E) -> Result<(), PublishError> {
        let Some(subscribers) = self.subscribers.get(&TypeId::of::<E>()) else {
            tracing::debug!("published event has no subscribers");
            return Ok(());
        };

        for subscriber in subscribers {
            subscriber
                .invoke(event)
                .await
                .map_err(|source| PublishError {
                    subscriber: subscriber.name(),
                    event_type: event.event_type(),
                    source,
                })?;
            metrics::counter!("bus_events_delivered").increment(1);
        }

        tracing::debug!(subscribers = subscribers.len(), "event delivered");
        metrics::counter!("bus_events_published").increment(1);

        Ok(())
    }

    /// Number of subscribers registered for event type `E`.
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.subscribers
            .get(&TypeId::of::<E>())
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    #[derive(Debug, Clone)]
    struct Tick {
        sequence: u64,
    }

    impl Event for Tick {
        fn event_type(&self) -> &'static str {
            "Tick"
        }
    }

    #[derive(Debug, Clone)]
    struct Tock;

    impl Event for Tock {
        fn event_type(&self) -> &'static str {
            "Tock"
        }
    }

    /// Records the order in which subscribers ran.
    struct Recorder {
        label: &'static str,
        log: Arc<Mutex<Vec<(&'static str, u64)>>>,
    }

    #[async_trait]
    impl EventHandler<Tick> for Recorder {
        fn name(&self) -> &'static str {
            self.label
        }

        async fn handle(&self, event: &Tick) -> Result<(), BoxError> {
            self.log.lock().await.push((self.label, event.sequence));
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl EventHandler<Tick> for Failing {
        fn name(&self) -> &'static str {
            "Failing"
        }

        async fn handle(&self, _event: &Tick) -> Result<(), BoxError> {
            Err("boom".into())
        }
    }

    struct Counting {
        count: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl EventHandler<Tick> for Counting {
        fn name(&self) -> &'static str {
            "Counting"
        }

        async fn handle(&self, _event: &Tick) -> Result<(), BoxError> {
            self.count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn publish_with_zero_subscribers_is_a_successful_no_op() {
        let bus = EventBus::builder().build();
        bus.publish(&Tick { sequence: 1 }).await.unwrap();
    }

    #[tokio::test]
    async fn publish_invokes_subscribers_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let bus = EventBus::builder()
            .subscribe::<Tick, _>(Recorder {
                label: "first",
                log: Arc::clone(&log),
            })
            .subscribe::<Tick, _>(Recorder {
                label: "second",
                log: Arc::clone(&log),
            })
            .build();

        bus.publish(&Tick { sequence: 7 }).await.unwrap();

        assert_eq!(*log.lock().await, vec![("first", 7), ("second", 7)]);
    }

    #[tokio::test]
    async fn publish_routes_by_exact_event_type() {
        let count = Arc::new(AtomicUsize::new(0));
        let bus = EventBus::builder()
            .subscribe::<Tick, _>(Counting {
                count: Arc::clone(&count),
            })
            .build();

        bus.publish(&Tock).await.unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);

        bus.publish(&Tick { sequence: 1 }).await.unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn subscriber_failure_propagates_and_stops_delivery() {
        let count = Arc::new(AtomicUsize::new(0));
        let bus = EventBus::builder()
            .subscribe::<Tick, _>(Failing)
            .subscribe::<Tick, _>(Counting {
                count: Arc::clone(&count),
            })
            .build();

        let err = bus.publish(&Tick { sequence: 1 }).await.unwrap_err();

        assert_eq!(err.subscriber, "Failing");
        assert_eq!(err.event_type, "Tick");
        // Delivery stops at the failing subscriber.
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failure_in_a_later_subscriber_keeps_earlier_effects() {
        let count = Arc::new(AtomicUsize::new(0));
        let bus = EventBus::builder()
            .subscribe::<Tick, _>(Counting {
                count: Arc::clone(&count),
            })
            .subscribe::<Tick, _>(Failing)
            .build();

        let err = bus.publish(&Tick { sequence: 1 }).await.unwrap_err();

        assert_eq!(err.subscriber, "Failing");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn subscriber_count_reports_per_event_type() {
        let count = Arc::new(AtomicUsize::new(0));
        let bus = EventBus::builder()
            .subscribe::<Tick, _>(Counting {
                count: Arc::clone(&count),
            })
            .build();

        assert_eq!(bus.subscriber_count::<Tick>(), 1);
        assert_eq!(bus.subscriber_count::<Tock>(), 0);
    }
}
