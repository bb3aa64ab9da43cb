pub mod calc;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod movies;
pub mod server;
pub mod util;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::db::Repository;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] db::DbError),
    #[error("Server error: {0}")]
    Server(String),
}

/// Loads the configuration (defaults when `config_path` is `None`), opens
/// the database and serves until Ctrl-C.
pub async fn run(config_path: Option<&str>, debug_logs: bool) -> Result<(), ServerError> {
    let mut config = match config_path {
        Some(path) => {
            info!("Using config file: {}", path);
            config::Config::from_file(path)?
        }
        None => config::Config::default(),
    };
    config.debug_logs = debug_logs;

    info!("Service name: {}", config.service_name);
    if config.debug_logs {
        info!("Debug logging enabled");
    }

    let db_path = config.database_path().to_string();
    info!("Opening database at {}", db_path);
    let db = Arc::new(db::SqliteRepository::new(&db_path).await?);

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let tls_files = config
        .tls_files()
        .map(|(cert, key)| (cert.to_string(), key.to_string()));

    let state = server::AppState::new(config, db.clone());
    let app = server::build_router(state);

    let result = match tls_files {
        Some((cert_path, key_path)) => serve_tls(app, addr, &cert_path, &key_path).await,
        None => serve_plain(app, addr).await,
    };

    info!("Closing database");
    db.close().await;

    result
}

async fn serve_plain(app: axum::Router, addr: SocketAddr) -> Result<(), ServerError> {
    info!("Serving HTTP on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(format!("Server error: {}", e)))
}

async fn serve_tls(
    app: axum::Router,
    addr: SocketAddr,
    cert_path: &str,
    key_path: &str,
) -> Result<(), ServerError> {
    info!("Loading TLS certificate from {}", cert_path);
    info!("Loading TLS key from {}", key_path);

    let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(cert_path, key_path)
        .await
        .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

    let handle = axum_server::Handle::new();
    let shutdown = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.graceful_shutdown(None);
    });

    info!("Serving HTTPS on {}", addr);

    axum_server::bind_rustls(addr, tls_config)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| ServerError::Server(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
