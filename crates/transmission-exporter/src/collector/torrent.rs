//! Per-torrent gauges, labelled by torrent id and name.

use prometheus::Registry;

use transmission_types::Torrent;

use super::{flag, gauge_vec};

const LABELS: &[&str] = &["id", "name"];
const TRACKER_LABELS: &[&str] = &["id", "name", "tracker"];

/// Registers the gauges describing `torrents`.
pub(crate) fn register(registry: &Registry, torrents: &[Torrent]) -> prometheus::Result<()> {
    let status = gauge_vec(
        registry,
        "transmission_torrent_status",
        "Status of a torrent (0 stopped, 1 check pending, 2 checking, 3 download pending, 4 downloading, 5 seed pending, 6 seeding)",
        LABELS,
    )?;
    let added = gauge_vec(
        registry,
        "transmission_torrent_added",
        "The unixtime time a torrent was added",
        LABELS,
    )?;
    let finished = gauge_vec(
        registry,
        "transmission_torrent_finished",
        "Indicates if a torrent is finished (1) or not (0)",
        LABELS,
    )?;
    let done = gauge_vec(
        registry,
        "transmission_torrent_done",
        "The fraction of a torrent being done",
        LABELS,
    )?;
    let ratio = gauge_vec(
        registry,
        "transmission_torrent_ratio",
        "The upload ratio of a torrent",
        LABELS,
    )?;
    let download = gauge_vec(
        registry,
        "transmission_torrent_download_bytes",
        "The current download rate of a torrent in bytes",
        LABELS,
    )?;
    let upload = gauge_vec(
        registry,
        "transmission_torrent_upload_bytes",
        "The current upload rate of a torrent in bytes",
        LABELS,
    )?;
    let downloaded_ever = gauge_vec(
        registry,
        "transmission_torrent_downloaded_ever_bytes",
        "The amount of bytes a torrent has downloaded",
        LABELS,
    )?;
    let uploaded_ever = gauge_vec(
        registry,
        "transmission_torrent_uploaded_ever_bytes",
        "The amount of bytes a torrent has uploaded",
        LABELS,
    )?;
    let size = gauge_vec(
        registry,
        "transmission_torrent_size_bytes",
        "The total size of a torrent in bytes",
        LABELS,
    )?;
    let peers_connected = gauge_vec(
        registry,
        "transmission_torrent_peers_connected",
        "The number of peers connected to a torrent",
        LABELS,
    )?;
    let peers_sending = gauge_vec(
        registry,
        "transmission_torrent_peers_sending_to_us",
        "The number of peers a torrent is downloading from",
        LABELS,
    )?;
    let peers_getting = gauge_vec(
        registry,
        "transmission_torrent_peers_getting_from_us",
        "The number of peers a torrent is uploading to",
        LABELS,
    )?;
    let error = gauge_vec(
        registry,
        "transmission_torrent_error",
        "The error code of a torrent, 0 when there is none",
        LABELS,
    )?;
    let seeders = gauge_vec(
        registry,
        "transmission_torrent_seeders",
        "The number of seeders a tracker reports for a torrent",
        TRACKER_LABELS,
    )?;
    let leechers = gauge_vec(
        registry,
        "transmission_torrent_leechers",
        "The number of leechers a tracker reports for a torrent",
        TRACKER_LABELS,
    )?;

    for torrent in torrents {
        let id = torrent.id.to_string();
        let labels = [id.as_str(), torrent.name.as_str()];

        status.with_label_values(&labels).set(torrent.status as f64);
        added.with_label_values(&labels).set(torrent.added_date as f64);
        finished
            .with_label_values(&labels)
            .set(flag(torrent.is_finished));
        done.with_label_values(&labels).set(torrent.percent_done);
        ratio.with_label_values(&labels).set(torrent.upload_ratio);
        download
            .with_label_values(&labels)
            .set(torrent.rate_download as f64);
        upload
            .with_label_values(&labels)
            .set(torrent.rate_upload as f64);
        downloaded_ever
            .with_label_values(&labels)
            .set(torrent.downloaded_ever as f64);
        uploaded_ever
            .with_label_values(&labels)
            .set(torrent.uploaded_ever as f64);
        size.with_label_values(&labels).set(torrent.total_size as f64);
        peers_connected
            .with_label_values(&labels)
            .set(torrent.peers_connected as f64);
        peers_sending
            .with_label_values(&labels)
            .set(torrent.peers_sending_to_us as f64);
        peers_getting
            .with_label_values(&labels)
            .set(torrent.peers_getting_from_us as f64);
        error.with_label_values(&labels).set(torrent.error as f64);

        // Negative counts mean the tracker has not reported yet.
        for tracker in &torrent.tracker_stats {
            let labels = [id.as_str(), torrent.name.as_str(), tracker.host.as_str()];
            if tracker.seeder_count >= 0 {
                seeders
                    .with_label_values(&labels)
                    .set(tracker.seeder_count as f64);
            }
            if tracker.leecher_count >= 0 {
                leechers
                    .with_label_values(&labels)
                    .set(tracker.leecher_count as f64);
            }
        }
    }

    Ok(())
}
