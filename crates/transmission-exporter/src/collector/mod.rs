//! Metric collectors, one per RPC command family.
//!
//! Every scrape builds a fresh [`Registry`], so a family whose query failed is
//! absent from the output instead of showing stale values. The outcome of each
//! collector is reported in `transmission_collector_success`.

use prometheus::{Encoder, Gauge, GaugeVec, Opts, Registry, TextEncoder, proto::MetricFamily};
use tracing::{debug, error};

use transmission_types::{RpcError, TransmissionRpc};

use crate::ExporterError;

mod session;
mod session_stats;
mod torrent;

/// Label value of the torrent collector.
pub const TORRENT: &str = "torrent";
/// Label value of the session settings collector.
pub const SESSION: &str = "session";
/// Label value of the session statistics collector.
pub const SESSION_STATS: &str = "session_stats";

/// Collects metrics from a Transmission daemon on demand.
#[derive(Debug)]
pub struct Exporter<C> {
    client: C,
}

impl<C: TransmissionRpc> Exporter<C> {
    /// Create an exporter querying `client`.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The client queried on every scrape.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Query the daemon once per collector and gather the resulting metrics.
    ///
    /// The three queries run concurrently. RPC failures are logged and reported
    /// through the success gauge, they never fail the scrape as a whole.
    pub async fn gather(&self) -> Result<Vec<MetricFamily>, ExporterError> {
        let registry = Registry::new();
        let success = gauge_vec(
            &registry,
            "transmission_collector_success",
            "Whether the last scrape of a collector succeeded (1) or not (0)",
            &["collector"],
        )?;

        let (torrents, session, stats) = tokio::join!(
            self.client.torrents(),
            self.client.session(),
            self.client.session_stats(),
        );

        let torrents = outcome(TORRENT, torrents);
        if let Some(torrents) = &torrents {
            torrent::register(&registry, torrents)?;
        }
        success
            .with_label_values(&[TORRENT])
            .set(flag(torrents.is_some()));

        let session = outcome(SESSION, session);
        if let Some(session) = &session {
            session::register(&registry, session)?;
        }
        success
            .with_label_values(&[SESSION])
            .set(flag(session.is_some()));

        let stats = outcome(SESSION_STATS, stats);
        if let Some(stats) = &stats {
            session_stats::register(&registry, stats)?;
        }
        success
            .with_label_values(&[SESSION_STATS])
            .set(flag(stats.is_some()));

        Ok(registry.gather())
    }

    /// Gather and encode in the Prometheus text format.
    ///
    /// Returns the content type along with the encoded body.
    pub async fn render(&self) -> Result<(String, Vec<u8>), ExporterError> {
        let families = self.gather().await?;
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&families, &mut buffer)?;

        Ok((encoder.format_type().to_owned(), buffer))
    }
}

/// Logs a failed query and discards its error.
fn outcome<T>(collector: &str, result: Result<T, RpcError>) -> Option<T> {
    match result {
        Ok(value) => {
            debug!(collector, "scrape succeeded");
            Some(value)
        }
        Err(err) if err.is_unauthorized() => {
            error!(collector, error = %err, "Transmission rejected the configured credentials");
            None
        }
        Err(err) => {
            error!(collector, error = %err, "failed to scrape Transmission");
            None
        }
    }
}

pub(crate) fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

pub(crate) fn gauge(registry: &Registry, name: &str, help: &str) -> prometheus::Result<Gauge> {
    let gauge = Gauge::with_opts(Opts::new(name, help))?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

pub(crate) fn gauge_vec(
    registry: &Registry,
    name: &str,
    help: &str,
    labels: &[&str],
) -> prometheus::Result<GaugeVec> {
    let gauge = GaugeVec::new(Opts::new(name, help), labels)?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}
