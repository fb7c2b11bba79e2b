//! HTTP API server for the order-management service.
//!
//! Translates the transport boundary into dispatched commands and queries:
//! request bodies deserialize into command/query values, the mediator
//! routes them, and handler outcomes map back onto status codes. All
//! handler registration happens in [`wire`], which fails fast on any
//! routing misconfiguration before the listener binds.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::{
    CreateOrder, CreateOrderHandler, GetOrderById, GetOrderByIdHandler, GetOrderSummaries,
    GetOrderSummariesHandler, OrderCreated,
};
use mediator::{EventBus, Mediator, RegistryError};
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::{ReadStore, WriteStore};
use projections::OrderCreatedProjection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all route handlers.
///
/// The mediator is the single entry point; routes never touch the stores
/// or the bus directly.
pub struct AppState {
    pub mediator: Arc<Mediator>,
}

/// Builds the bus and the mediator routing table over the given stores.
///
/// Subscribes the read-model projection, registers every handler, and
/// verifies the routing table covers each request type the transport
/// dispatches. Any [`RegistryError`] is a fatal configuration failure.
pub fn wire(
    write_store: Arc<dyn WriteStore>,
    read_store: Arc<dyn ReadStore>,
) -> Result<Arc<AppState>, RegistryError> {
    let bus = Arc::new(
        EventBus::builder()
            .subscribe::<OrderCreated, _>(OrderCreatedProjection::new(Arc::clone(&read_store)))
            .build(),
    );

    let mediator = Mediator::builder()
        .register_command::<CreateOrder, _>(CreateOrderHandler::new(
            Arc::clone(&write_store),
            Arc::clone(&bus),
        ))?
        .register_query::<GetOrderById, _>(GetOrderByIdHandler::new(Arc::clone(&read_store)))?
        .register_query::<GetOrderSummaries, _>(GetOrderSummariesHandler::new(read_store))?
        .build();

    mediator.ensure_command::<CreateOrder>()?;
    mediator.ensure_query::<GetOrderById>()?;
    mediator.ensure_query::<GetOrderSummaries>()?;

    Ok(Arc::new(AppState {
        mediator: Arc::new(mediator),
    }))
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/orders", post(routes::orders::create))
        .route("/orders", get(routes::orders::list))
        .route("/orders/{id}", get(routes::orders::get))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
