use crate::domain::ports::SessionStore;
use crate::frameworks::config::{ConfigError, ServerConfig, StoreConfig};
use crate::frameworks::db::MongoSessionStore;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::{AppState, InMemorySessionStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to set up the MongoDB client: {0}")]
    Store(#[from] mongodb::error::Error),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// Process entry point: configure, build the store, serve until a shutdown
// signal arrives, then close the store.
pub async fn run() -> Result<(), StartupError> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = ServerConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let store = build_store(&config.store).await?;
    let state = Arc::new(AppState::new(store.clone(), config.schema));

    let listener = TcpListener::bind(config.addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.addr,
            source,
        })?;
    tracing::info!(
        addr = %config.addr,
        schema = %config.schema,
        store = %config.store.backend(),
        "listening"
    );

    let served = serve(listener, state).await;

    store.close().await;
    tracing::info!("session store closed");

    served.map_err(StartupError::Serve)
}

// Serve the HTTP API on an already bound listener until shutdown is signalled.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    let app = routes::app(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn build_store(config: &StoreConfig) -> Result<Arc<dyn SessionStore>, StartupError> {
    let store: Arc<dyn SessionStore> = match config {
        StoreConfig::Mongo {
            uri,
            database,
            collection,
        } => {
            let store = MongoSessionStore::connect(uri, database, collection).await?;
            tracing::info!(%database, %collection, "mongodb session store ready");
            Arc::new(store)
        }
        StoreConfig::Memory => {
            tracing::warn!("using the in-memory session store; sessions are lost on exit");
            Arc::new(InMemorySessionStore::default())
        }
    };
    Ok(store)
}

// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("signal received, starting graceful shutdown");
}
