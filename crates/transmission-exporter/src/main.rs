//! # Transmission Exporter
//!
//! ## Usage
//!
//! ```sh,ignore
//! TRANSMISSION_ADDR=http://localhost:9091 cargo run --release --bin transmission-exporter
//! ```

use std::sync::Arc;

use axum_server::Handle;
use base64 as _;
use bcrypt as _;
use clap::Parser;
use prometheus as _;
use rustls as _;
use serde as _;
use serde_yaml as _;
use thiserror as _;
use tracing::{debug, info};
use tracing_subscriber as _;
use transmission_types as _;

#[cfg(test)]
use {
    reqwest as _, serde_json as _, tempfile as _, test_log as _, tower as _, wiremock as _,
};

use transmission_exporter::{
    collector::Exporter,
    logging::init_tracing,
    server::{SHUTDOWN_GRACE, parse_listen_addr, router, serve_tls, shutdown_signal},
    web_config::WebConfig,
};
use transmission_rpc::RpcClient;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.log_format)?;

    info!("Starting transmission-exporter {}", env!("CARGO_PKG_VERSION"));
    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(_) => info!("No .env file loaded"),
    }

    let addr = parse_listen_addr(&cli.web_addr)?;
    let web_config = match &cli.web_config_file {
        Some(path) => {
            info!("Using web config {}", path.display());
            WebConfig::load(path)?
        }
        None => WebConfig::default(),
    };
    let tls = web_config.rustls_config().await?;

    let client = RpcClient::try_new(&cli.transmission_addr, cli.credentials())?;
    info!("Scraping Transmission at {}", client.transport().url());

    let app = router(Arc::new(Exporter::new(client)), &cli.web_path)?;
    let app = web_config.protect(app);
    let shutdown = shutdown_signal()?;

    match tls {
        Some(config) => {
            let handle = Handle::new();
            let signal_handle = handle.clone();
            tokio::spawn(async move {
                shutdown.await;
                signal_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
            });

            info!("Serving metrics on https://{}{}", addr, cli.web_path);
            serve_tls(addr, app, config, handle).await?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("Serving metrics on http://{}{}", addr, cli.web_path);
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await?;
        }
    }

    info!("Stopped");
    Ok(())
}
