//! # Transmission Exporter
//!
//! Serves the state of a Transmission daemon as Prometheus metrics. Every scrape
//! queries the daemon afresh; nothing is cached between scrapes.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use transmission_exporter::{collector::Exporter, server};
//! use transmission_rpc::RpcClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RpcClient::try_new("http://localhost:9091", None)?;
//!     let app = server::router(Arc::new(Exporter::new(client)), "/metrics")?;
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:19091").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

#[cfg(test)]
use {reqwest as _, serde_json as _, wiremock as _};

use dotenvy as _;
use thiserror::Error;
use transmission_types::RpcError;

pub mod collector;
pub mod logging;
pub mod server;
pub mod web_config;

/// Error variants for the exporter.
#[derive(Error, Debug)]
pub enum ExporterError {
    /// Registering or encoding metrics failed.
    #[error("prometheus: {0}")]
    Prometheus(#[from] prometheus::Error),

    /// The configured listen address could not be parsed.
    #[error("invalid listen address: {0}")]
    ListenAddr(String),

    /// The metrics path cannot be routed.
    #[error("invalid metrics path: {0}")]
    MetricsPath(String),

    /// The web configuration file is unreadable or invalid.
    #[error("web config: {0}")]
    WebConfig(String),

    /// The tracing subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),

    /// The RPC client could not be created.
    #[error("transmission client: {0}")]
    Rpc(#[from] RpcError),

    /// Represents a generic I/O error.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
