//! Gauges for the daemon's session settings.

use prometheus::Registry;

use transmission_types::Session;

use super::{gauge, gauge_vec};

/// The daemon reports speeds in kB/s.
const KILO: f64 = 1000.0;
/// The daemon reports the cache size in MiB.
const MEBI: f64 = 1024.0 * 1024.0;

fn enabled(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

/// Registers the gauges describing `session`.
pub(crate) fn register(registry: &Registry, session: &Session) -> prometheus::Result<()> {
    gauge_vec(
        registry,
        "transmission_alt_speed_down",
        "Alternative max global download speed in bytes",
        &["enabled"],
    )?
    .with_label_values(&[enabled(session.alt_speed_enabled)])
    .set(session.alt_speed_down as f64 * KILO);

    gauge_vec(
        registry,
        "transmission_alt_speed_up",
        "Alternative max global upload speed in bytes",
        &["enabled"],
    )?
    .with_label_values(&[enabled(session.alt_speed_enabled)])
    .set(session.alt_speed_up as f64 * KILO);

    gauge_vec(
        registry,
        "transmission_speed_limit_down_bytes",
        "Max global download speed in bytes",
        &["enabled"],
    )?
    .with_label_values(&[enabled(session.speed_limit_down_enabled)])
    .set(session.speed_limit_down as f64 * KILO);

    gauge_vec(
        registry,
        "transmission_speed_limit_up_bytes",
        "Max global upload speed in bytes",
        &["enabled"],
    )?
    .with_label_values(&[enabled(session.speed_limit_up_enabled)])
    .set(session.speed_limit_up as f64 * KILO);

    gauge(
        registry,
        "transmission_cache_size_bytes",
        "Maximum size of the disk cache in bytes",
    )?
    .set(session.cache_size_mb as f64 * MEBI);

    gauge(
        registry,
        "transmission_free_space",
        "Free space left on disk to be used by transmission downloads",
    )?
    .set(session.download_dir_free_space as f64);

    gauge_vec(
        registry,
        "transmission_queue_down",
        "Max number of torrents to download at once",
        &["enabled"],
    )?
    .with_label_values(&[enabled(session.download_queue_enabled)])
    .set(session.download_queue_size as f64);

    gauge_vec(
        registry,
        "transmission_queue_up",
        "Max number of torrents to upload at once",
        &["enabled"],
    )?
    .with_label_values(&[enabled(session.seed_queue_enabled)])
    .set(session.seed_queue_size as f64);

    gauge(
        registry,
        "transmission_global_peer_limit",
        "Maximum global number of peers",
    )?
    .set(session.peer_limit_global as f64);

    gauge(
        registry,
        "transmission_torrent_peer_limit",
        "Maximum number of peers for a single torrent",
    )?
    .set(session.peer_limit_per_torrent as f64);

    gauge_vec(
        registry,
        "transmission_seed_ratio_limit",
        "The default seed ratio for torrents to use",
        &["enabled"],
    )?
    .with_label_values(&[enabled(session.seed_ratio_limited)])
    .set(session.seed_ratio_limit);

    gauge_vec(
        registry,
        "transmission_version",
        "Transmission version as label",
        &["version"],
    )?
    .with_label_values(&[session.version.as_str()])
    .set(1.0);

    Ok(())
}
