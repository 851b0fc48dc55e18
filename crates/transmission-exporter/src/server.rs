//! HTTP surface of the exporter.

use std::{
    future::Future,
    io,
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use axum_server::{Handle, tls_rustls::RustlsConfig};
use tokio::signal::unix::{SignalKind, signal};
use tracing::{error, info};

use transmission_rpc::RpcClient;

use crate::{ExporterError, collector::Exporter};

#[derive(Clone)]
struct AppState {
    exporter: Arc<Exporter<RpcClient>>,
    landing_page: Arc<str>,
}

/// Time in-flight scrapes get to finish once shutdown starts.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Builds the router serving metrics at `metrics_path`.
///
/// When the metrics are not served at `/`, the root serves a short HTML page
/// linking to them. Every other path answers 404.
pub fn router(
    exporter: Arc<Exporter<RpcClient>>,
    metrics_path: &str,
) -> Result<Router, ExporterError> {
    let metrics_path = normalize_metrics_path(metrics_path)?;
    let state = AppState {
        exporter,
        landing_page: landing_page(&metrics_path).into(),
    };

    let mut router = Router::new().route(&metrics_path, get(metrics));
    if metrics_path != "/" {
        router = router.route("/", get(index));
    }
    Ok(router.with_state(state))
}

/// Prefixes `path` with `/` and rejects route captures and wildcards.
pub fn normalize_metrics_path(path: &str) -> Result<String, ExporterError> {
    if path.is_empty() {
        return Err(ExporterError::MetricsPath(
            "the metrics path must not be empty".to_string(),
        ));
    }
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    let dynamic = path.split('/').any(|segment| {
        segment.starts_with(':') || segment.starts_with('*') || segment.contains(['{', '}'])
    });
    if dynamic {
        return Err(ExporterError::MetricsPath(format!(
            "{path}: segments must not start with ':' or '*' or contain braces"
        )));
    }
    Ok(path)
}

fn landing_page(metrics_path: &str) -> String {
    format!(
        "<html>\n\
         <head><title>Transmission Exporter</title></head>\n\
         <body>\n\
         <h1>Transmission Exporter</h1>\n\
         <p>Version {version}</p>\n\
         <p><a href=\"{metrics_path}\">Metrics</a></p>\n\
         </body>\n\
         </html>\n",
        version = env!("CARGO_PKG_VERSION"),
    )
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.landing_page.to_string())
}

async fn metrics(State(state): State<AppState>) -> Response {
    match state.exporter.render().await {
        Ok((content_type, body)) => ([(header::CONTENT_TYPE, content_type)], body).into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Parses a listen address, accepting the `:port` shorthand for all interfaces.
pub fn parse_listen_addr(addr: &str) -> Result<SocketAddr, ExporterError> {
    if let Some(port) = addr.strip_prefix(':') {
        let port = port
            .parse::<u16>()
            .map_err(|_| ExporterError::ListenAddr(addr.to_string()))?;
        return Ok(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)));
    }

    addr.parse()
        .map_err(|_| ExporterError::ListenAddr(addr.to_string()))
}

/// Serves `app` over TLS until `handle` is told to shut down.
pub async fn serve_tls(
    addr: SocketAddr,
    app: Router,
    config: RustlsConfig,
    handle: Handle,
) -> Result<(), ExporterError> {
    axum_server::bind_rustls(addr, config)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

/// Returns a future resolving on the first SIGINT or SIGTERM.
///
/// The handlers are installed before this returns, so a signal arriving while
/// the server starts up is not lost.
pub fn shutdown_signal() -> io::Result<impl Future<Output = ()>> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    Ok(async move {
        tokio::select! {
            _ = sigint.recv() => {},
            _ = sigterm.recv() => {},
        }
        info!("Shutdown signal received, draining connections");
    })
}
