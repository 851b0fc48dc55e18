//! # Transmission Types
//!
//! This crate defines the entities decoded from the Transmission RPC API, the error
//! taxonomy shared by the RPC client and its consumers, and the [`TransmissionRpc`]
//! trait the metric collectors are written against.

use thiserror::Error;

/// Error type for Transmission RPC operations.
#[derive(Error, Debug)]
pub enum RpcError {
    /// The daemon rejected the configured credentials (HTTP 401).
    #[error("{0}")]
    Unauthorized(String),

    /// Network failure, or an HTTP status the client does not know how to handle.
    #[error("{message}")]
    Transport {
        /// HTTP status code, absent when the request never got a response.
        status: Option<u16>,
        /// Human readable description, including the response body when there was one.
        message: String,
    },

    /// The daemon accepted the request but reported a failure in the `result` field.
    #[error("rpc error: {0}")]
    Rpc(String),

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The configured daemon address is not a valid URL.
    #[error("invalid RPC URL: {0}")]
    InvalidUrl(String),
}

impl RpcError {
    /// Builds a [`RpcError::Transport`] for a response with the given status code.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Builds a [`RpcError::Transport`] for a request that never got a response.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Whether the daemon rejected our credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// HTTP status code attached to the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            Self::Unauthorized(_) => Some(401),
            _ => None,
        }
    }
}

/// Query interface over a Transmission daemon.
///
/// Every call is a single round trip; implementations do not cache.
#[allow(async_fn_in_trait)]
pub trait TransmissionRpc {
    /// List all torrents known to the daemon. Never fails on an empty list.
    async fn torrents(&self) -> Result<Vec<Torrent>, RpcError>;
    /// Get the daemon-wide session settings.
    async fn session(&self) -> Result<Session, RpcError>;
    /// Get the daemon-wide session statistics.
    async fn session_stats(&self) -> Result<SessionStats, RpcError>;
}

// The below follow the Transmission RPC field names, in snake case.

/// Torrent information, one per torrent returned by `torrent-get`.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)] // rationale: these are the same fields as in Transmission RPC
pub struct Torrent {
    pub id: i32,

    pub name: String,

    pub hash_string: String,

    /// Status code: 0 stopped, 1 check pending, 2 checking, 3 download pending,
    /// 4 downloading, 5 seed pending, 6 seeding.
    pub status: i32,

    pub added_date: i64,

    pub download_dir: String,

    pub total_size: i64,

    pub left_until_done: i64,

    pub eta: i64,

    pub percent_done: f64,

    pub upload_ratio: f64,

    pub rate_download: i64,

    pub rate_upload: i64,

    pub downloaded_ever: i64,

    pub uploaded_ever: i64,

    pub is_finished: bool,

    pub error: i32,

    pub error_string: String,

    pub peers_connected: i32,

    pub peers_getting_from_us: i32,

    pub peers_sending_to_us: i32,

    pub tracker_stats: Vec<TrackerStats>,
}

/// Per-tracker swarm counts. The daemon reports `-1` when a count is unknown.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct TrackerStats {
    pub host: String,

    pub seeder_count: i64,

    pub leecher_count: i64,
}

/// Session settings returned by `session-get`.
///
/// Speeds are in kB/s and the cache size in MiB, as the daemon reports them.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct Session {
    pub alt_speed_down: i64,

    pub alt_speed_enabled: bool,

    pub alt_speed_up: i64,

    pub cache_size_mb: i64,

    pub download_dir: String,

    pub download_dir_free_space: i64,

    pub download_queue_enabled: bool,

    pub download_queue_size: i64,

    pub peer_limit_global: i64,

    pub peer_limit_per_torrent: i64,

    pub seed_queue_enabled: bool,

    pub seed_queue_size: i64,

    pub seed_ratio_limit: f64,

    pub seed_ratio_limited: bool,

    pub speed_limit_down: i64,

    pub speed_limit_down_enabled: bool,

    pub speed_limit_up: i64,

    pub speed_limit_up_enabled: bool,

    pub version: String,
}

/// Session statistics returned by `session-stats`.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct SessionStats {
    pub active_torrent_count: i64,

    pub download_speed: i64,

    pub paused_torrent_count: i64,

    pub torrent_count: i64,

    pub upload_speed: i64,

    pub current_stats: StatsDetails,

    pub cumulative_stats: StatsDetails,
}

/// Transfer counters, either for the running daemon or across all of its sessions.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct StatsDetails {
    pub downloaded_bytes: i64,

    pub files_added: i64,

    pub seconds_active: i64,

    pub session_count: i64,

    pub uploaded_bytes: i64,
}

#[cfg(test)]
mod tests {
    use super::RpcError;

    #[test]
    fn unauthorized_is_distinguishable() {
        let err = RpcError::Unauthorized("authorization failed".into());
        assert!(err.is_unauthorized());
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.to_string(), "authorization failed");
    }

    #[test]
    fn transport_carries_status() {
        let err = RpcError::status(500, "server error, status code: 500");
        assert!(!err.is_unauthorized());
        assert_eq!(err.status_code(), Some(500));
        assert!(err.to_string().contains("500"));

        let err = RpcError::network("connection refused");
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn rpc_error_names_the_result() {
        let err = RpcError::Rpc("no such method".into());
        assert_eq!(err.to_string(), "rpc error: no such method");
        assert_eq!(err.status_code(), None);
    }
}
