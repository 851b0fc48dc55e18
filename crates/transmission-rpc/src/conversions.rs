//! Conversions from wire shapes to `transmission_types` entities.

use transmission_types::{Session, SessionStats, StatsDetails, Torrent, TrackerStats};

use crate::command::{
    RpcSession, RpcSessionStats, RpcStatsDetails, RpcTorrent, RpcTrackerStats, TorrentGetResponse,
};

impl From<TorrentGetResponse> for Vec<Torrent> {
    fn from(value: TorrentGetResponse) -> Self {
        value
            .torrents
            .unwrap_or_default()
            .into_iter()
            .map(Torrent::from)
            .collect()
    }
}

impl From<RpcTorrent> for Torrent {
    fn from(value: RpcTorrent) -> Self {
        Self {
            id: value.id,
            name: value.name,
            hash_string: value.hash_string,
            status: value.status,
            added_date: value.added_date,
            download_dir: value.download_dir,
            total_size: value.total_size,
            left_until_done: value.left_until_done,
            eta: value.eta,
            percent_done: value.percent_done,
            upload_ratio: value.upload_ratio,
            rate_download: value.rate_download,
            rate_upload: value.rate_upload,
            downloaded_ever: value.downloaded_ever,
            uploaded_ever: value.uploaded_ever,
            is_finished: value.is_finished,
            error: value.error,
            error_string: value.error_string,
            peers_connected: value.peers_connected,
            peers_getting_from_us: value.peers_getting_from_us,
            peers_sending_to_us: value.peers_sending_to_us,
            tracker_stats: value
                .tracker_stats
                .into_iter()
                .map(TrackerStats::from)
                .collect(),
        }
    }
}

impl From<RpcTrackerStats> for TrackerStats {
    fn from(value: RpcTrackerStats) -> Self {
        Self {
            host: value.host,
            seeder_count: value.seeder_count,
            leecher_count: value.leecher_count,
        }
    }
}

impl From<RpcSession> for Session {
    fn from(value: RpcSession) -> Self {
        Self {
            alt_speed_down: value.alt_speed_down,
            alt_speed_enabled: value.alt_speed_enabled,
            alt_speed_up: value.alt_speed_up,
            cache_size_mb: value.cache_size_mb,
            download_dir: value.download_dir,
            download_dir_free_space: value.download_dir_free_space,
            download_queue_enabled: value.download_queue_enabled,
            download_queue_size: value.download_queue_size,
            peer_limit_global: value.peer_limit_global,
            peer_limit_per_torrent: value.peer_limit_per_torrent,
            seed_queue_enabled: value.seed_queue_enabled,
            seed_queue_size: value.seed_queue_size,
            seed_ratio_limit: value.seed_ratio_limit,
            seed_ratio_limited: value.seed_ratio_limited,
            speed_limit_down: value.speed_limit_down,
            speed_limit_down_enabled: value.speed_limit_down_enabled,
            speed_limit_up: value.speed_limit_up,
            speed_limit_up_enabled: value.speed_limit_up_enabled,
            version: value.version,
        }
    }
}

impl From<RpcSessionStats> for SessionStats {
    fn from(value: RpcSessionStats) -> Self {
        Self {
            active_torrent_count: value.active_torrent_count,
            download_speed: value.download_speed,
            paused_torrent_count: value.paused_torrent_count,
            torrent_count: value.torrent_count,
            upload_speed: value.upload_speed,
            current_stats: value.current_stats.into(),
            cumulative_stats: value.cumulative_stats.into(),
        }
    }
}

impl From<RpcStatsDetails> for StatsDetails {
    fn from(value: RpcStatsDetails) -> Self {
        Self {
            downloaded_bytes: value.downloaded_bytes,
            files_added: value.files_added,
            seconds_active: value.seconds_active,
            session_count: value.session_count,
            uploaded_bytes: value.uploaded_bytes,
        }
    }
}
