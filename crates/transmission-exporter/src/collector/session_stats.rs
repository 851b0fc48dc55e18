//! Gauges for the daemon's session statistics.

use prometheus::Registry;

use transmission_types::{SessionStats, StatsDetails};

use super::{gauge, gauge_vec};

/// Registers the gauges describing `stats`.
pub(crate) fn register(registry: &Registry, stats: &SessionStats) -> prometheus::Result<()> {
    gauge(
        registry,
        "transmission_session_stats_download_speed_bytes",
        "Current download speed in bytes",
    )?
    .set(stats.download_speed as f64);
    gauge(
        registry,
        "transmission_session_stats_upload_speed_bytes",
        "Current upload speed in bytes",
    )?
    .set(stats.upload_speed as f64);
    gauge(
        registry,
        "transmission_session_stats_torrents_total",
        "The total number of torrents",
    )?
    .set(stats.torrent_count as f64);
    gauge(
        registry,
        "transmission_session_stats_torrents_active",
        "The number of active torrents",
    )?
    .set(stats.active_torrent_count as f64);
    gauge(
        registry,
        "transmission_session_stats_torrents_paused",
        "The number of paused torrents",
    )?
    .set(stats.paused_torrent_count as f64);

    let downloaded = gauge_vec(
        registry,
        "transmission_session_stats_downloaded_bytes",
        "The number of downloaded bytes",
        &["type"],
    )?;
    let uploaded = gauge_vec(
        registry,
        "transmission_session_stats_uploaded_bytes",
        "The number of uploaded bytes",
        &["type"],
    )?;
    let files_added = gauge_vec(
        registry,
        "transmission_session_stats_files_added",
        "The number of files added",
        &["type"],
    )?;
    let active = gauge_vec(
        registry,
        "transmission_session_stats_active_seconds",
        "The number of seconds the daemon has been active",
        &["type"],
    )?;
    let sessions = gauge_vec(
        registry,
        "transmission_session_stats_sessions",
        "The number of sessions",
        &["type"],
    )?;

    let details: [(&str, &StatsDetails); 2] = [
        ("current", &stats.current_stats),
        ("cumulative", &stats.cumulative_stats),
    ];
    for (kind, detail) in details {
        downloaded
            .with_label_values(&[kind])
            .set(detail.downloaded_bytes as f64);
        uploaded
            .with_label_values(&[kind])
            .set(detail.uploaded_bytes as f64);
        files_added
            .with_label_values(&[kind])
            .set(detail.files_added as f64);
        active
            .with_label_values(&[kind])
            .set(detail.seconds_active as f64);
        sessions
            .with_label_values(&[kind])
            .set(detail.session_count as f64);
    }

    Ok(())
}
