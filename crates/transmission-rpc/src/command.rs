//! Wire format of the three RPC command families.
//!
//! Requests are `{"method": ..., "arguments": ...}` envelopes and responses are
//! `{"result": ..., "arguments": ...}`. Response shapes are decoded permissively:
//! unknown fields are ignored and missing ones take their default value.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use transmission_types::RpcError;

/// Value of `result` on success.
const SUCCESS: &str = "success";

pub(crate) const TORRENT_GET: &str = "torrent-get";
pub(crate) const SESSION_GET: &str = "session-get";
pub(crate) const SESSION_STATS: &str = "session-stats";

/// Torrent fields requested from `torrent-get`.
pub(crate) const TORRENT_FIELDS: &[&str] = &[
    "id",
    "name",
    "hashString",
    "status",
    "addedDate",
    "downloadDir",
    "totalSize",
    "leftUntilDone",
    "eta",
    "percentDone",
    "uploadRatio",
    "rateDownload",
    "rateUpload",
    "downloadedEver",
    "uploadedEver",
    "isFinished",
    "error",
    "errorString",
    "peersConnected",
    "peersGettingFromUs",
    "peersSendingToUs",
    "trackerStats",
];

/// Outbound envelope.
#[derive(Debug, Serialize)]
pub(crate) struct Request<A> {
    pub(crate) method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) arguments: Option<A>,
}

/// Arguments of `torrent-get`.
#[derive(Debug, Serialize)]
pub(crate) struct TorrentGetArguments {
    pub(crate) fields: &'static [&'static str],
}

impl Request<TorrentGetArguments> {
    pub(crate) fn torrent_get() -> Self {
        Self {
            method: TORRENT_GET,
            arguments: Some(TorrentGetArguments {
                fields: TORRENT_FIELDS,
            }),
        }
    }
}

impl Request<()> {
    pub(crate) fn session_get() -> Self {
        Self {
            method: SESSION_GET,
            arguments: None,
        }
    }

    pub(crate) fn session_stats() -> Self {
        Self {
            method: SESSION_STATS,
            arguments: None,
        }
    }
}

/// Inbound envelope.
#[derive(Debug, Deserialize)]
struct Response<A> {
    #[serde(default)]
    result: String,
    #[serde(default)]
    arguments: Option<A>,
}

/// Decodes a response envelope, failing when the daemon did not report success.
pub(crate) fn decode<A>(body: &[u8]) -> Result<A, RpcError>
where
    A: DeserializeOwned + Default,
{
    let response: Response<A> =
        serde_json::from_slice(body).map_err(|e| RpcError::Decode(e.to_string()))?;

    if response.result != SUCCESS {
        return Err(RpcError::Rpc(response.result));
    }

    Ok(response.arguments.unwrap_or_default())
}

/// Arguments of a `torrent-get` response.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TorrentGetResponse {
    pub(crate) torrents: Option<Vec<RpcTorrent>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RpcTorrent {
    pub(crate) id: i32,
    pub(crate) name: String,
    pub(crate) hash_string: String,
    pub(crate) status: i32,
    pub(crate) added_date: i64,
    pub(crate) download_dir: String,
    pub(crate) total_size: i64,
    pub(crate) left_until_done: i64,
    pub(crate) eta: i64,
    pub(crate) percent_done: f64,
    pub(crate) upload_ratio: f64,
    pub(crate) rate_download: i64,
    pub(crate) rate_upload: i64,
    pub(crate) downloaded_ever: i64,
    pub(crate) uploaded_ever: i64,
    pub(crate) is_finished: bool,
    pub(crate) error: i32,
    pub(crate) error_string: String,
    pub(crate) peers_connected: i32,
    pub(crate) peers_getting_from_us: i32,
    pub(crate) peers_sending_to_us: i32,
    pub(crate) tracker_stats: Vec<RpcTrackerStats>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RpcTrackerStats {
    pub(crate) host: String,
    pub(crate) seeder_count: i64,
    pub(crate) leecher_count: i64,
}

/// Arguments of a `session-get` response. Mostly kebab-case, with a few
/// camelCase stragglers.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct RpcSession {
    pub(crate) alt_speed_down: i64,
    pub(crate) alt_speed_enabled: bool,
    pub(crate) alt_speed_up: i64,
    pub(crate) cache_size_mb: i64,
    pub(crate) download_dir: String,
    pub(crate) download_dir_free_space: i64,
    pub(crate) download_queue_enabled: bool,
    pub(crate) download_queue_size: i64,
    pub(crate) peer_limit_global: i64,
    pub(crate) peer_limit_per_torrent: i64,
    pub(crate) seed_queue_enabled: bool,
    pub(crate) seed_queue_size: i64,
    #[serde(rename = "seedRatioLimit")]
    pub(crate) seed_ratio_limit: f64,
    #[serde(rename = "seedRatioLimited")]
    pub(crate) seed_ratio_limited: bool,
    pub(crate) speed_limit_down: i64,
    pub(crate) speed_limit_down_enabled: bool,
    pub(crate) speed_limit_up: i64,
    pub(crate) speed_limit_up_enabled: bool,
    pub(crate) version: String,
}

/// Arguments of a `session-stats` response.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RpcSessionStats {
    pub(crate) active_torrent_count: i64,
    pub(crate) download_speed: i64,
    pub(crate) paused_torrent_count: i64,
    pub(crate) torrent_count: i64,
    pub(crate) upload_speed: i64,
    #[serde(rename = "current-stats")]
    pub(crate) current_stats: RpcStatsDetails,
    #[serde(rename = "cumulative-stats")]
    pub(crate) cumulative_stats: RpcStatsDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RpcStatsDetails {
    pub(crate) downloaded_bytes: i64,
    pub(crate) files_added: i64,
    pub(crate) seconds_active: i64,
    pub(crate) session_count: i64,
    pub(crate) uploaded_bytes: i64,
}
