//! Shared test utilities and fixtures.

pub(crate) const TORRENT_GET_RESPONSE: &str = r#"{
    "arguments": {
        "torrents": [
            {
                "id": 1,
                "name": "Test Torrent",
                "status": 4,
                "totalSize": 100000,
                "percentDone": 0.5,
                "uploadRatio": 1.5,
                "rateDownload": 1000,
                "rateUpload": 500
            }
        ]
    },
    "result": "success"
}"#;

pub(crate) const TORRENT_GET_WITH_TRACKERS_RESPONSE: &str = r#"{
    "arguments": {
        "torrents": [
            {
                "id": 7,
                "name": "debian.iso",
                "hashString": "abc123",
                "isFinished": true,
                "downloadedEver": 4096,
                "uploadedEver": 8192,
                "peersConnected": 5,
                "peersGettingFromUs": 2,
                "peersSendingToUs": 3,
                "files": [{"name": "debian.iso", "length": 4096}],
                "trackerStats": [
                    {"host": "https://tracker.example:443", "seederCount": 12, "leecherCount": 3, "tier": 0},
                    {"host": "udp://backup.example:6969", "seederCount": -1, "leecherCount": -1}
                ]
            }
        ]
    },
    "result": "success"
}"#;

pub(crate) const EMPTY_TORRENTS_RESPONSE: &str =
    r#"{"arguments":{"torrents":[]},"result":"success"}"#;

pub(crate) const SESSION_GET_RESPONSE: &str = r#"{
    "arguments": {
        "alt-speed-down": 50,
        "alt-speed-enabled": false,
        "alt-speed-up": 50,
        "download-dir": "/downloads",
        "peer-limit-global": 200,
        "peer-limit-per-torrent": 50,
        "speed-limit-down": 100,
        "speed-limit-down-enabled": true,
        "speed-limit-up": 100,
        "speed-limit-up-enabled": true,
        "version": "4.0.3"
    },
    "result": "success"
}"#;

pub(crate) const SESSION_STATS_RESPONSE: &str = r#"{
    "arguments": {
        "activeTorrentCount": 2,
        "downloadSpeed": 1000,
        "uploadSpeed": 500,
        "torrentCount": 5,
        "pausedTorrentCount": 3,
        "current-stats": {
            "uploadedBytes": 1000000,
            "downloadedBytes": 2000000,
            "filesAdded": 10,
            "secondsActive": 3600
        },
        "cumulative-stats": {
            "uploadedBytes": 5000000,
            "downloadedBytes": 10000000,
            "filesAdded": 50,
            "secondsActive": 86400
        }
    },
    "result": "success"
}"#;

/// Extracts the `method` of an encoded request.
pub(crate) fn method_of(payload: &[u8]) -> String {
    let value: serde_json::Value = serde_json::from_slice(payload).unwrap();
    value["method"].as_str().unwrap_or_default().to_owned()
}
