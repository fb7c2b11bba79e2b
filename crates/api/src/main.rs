//! API server entry point.

use std::sync::Arc;

use api::config::Config;
use order_store::{
    InMemoryReadStore, InMemoryWriteStore, PostgresReadStore, PostgresWriteStore, ReadStore,
    WriteStore,
};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Connects the configured stores, or falls back to in-memory ones when
/// the connection strings are absent.
async fn create_stores(config: &Config) -> (Arc<dyn WriteStore>, Arc<dyn ReadStore>) {
    match config.database_urls() {
        Some((write_url, read_url)) => {
            let write_pool = sqlx::PgPool::connect(write_url)
                .await
                .expect("failed to connect to write database");
            let read_pool = sqlx::PgPool::connect(read_url)
                .await
                .expect("failed to connect to read database");

            let write_store = PostgresWriteStore::new(write_pool);
            let read_store = PostgresReadStore::new(read_pool);

            write_store
                .run_migrations()
                .await
                .expect("write store migrations failed");
            read_store
                .run_migrations()
                .await
                .expect("read store migrations failed");

            tracing::info!("using PostgreSQL stores");
            (Arc::new(write_store), Arc::new(read_store))
        }
        None => {
            tracing::warn!("store connection strings not set, using in-memory stores");
            (
                Arc::new(InMemoryWriteStore::new()),
                Arc::new(InMemoryReadStore::new()),
            )
        }
    }
}

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Create stores and wire the routing tables. A registry error here
    //    is a configuration bug and must abort before the listener binds.
    let config = Config::from_env();
    let (write_store, read_store) = create_stores(&config).await;
    let state = api::wire(write_store, read_store).expect("handler registration failed");

    // 4. Build the application
    let app = api::create_app(state, metrics_handle);

    // 5. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
