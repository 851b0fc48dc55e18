//! Session token storage and the handshake that obtains it.
//!
//! The daemon answers any request lacking a valid token with `409 Conflict` and
//! the token to use in the [`SESSION_ID_HEADER`] header.

use reqwest::{StatusCode, header::HeaderMap};
use tokio::sync::RwLock;

use transmission_types::RpcError;

/// Header carrying the session token in both directions.
pub const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

/// The single most recent session token handed out by the daemon.
#[derive(Debug, Default)]
pub(crate) struct SessionToken(RwLock<Option<String>>);

impl SessionToken {
    pub(crate) fn new(initial: Option<String>) -> Self {
        Self(RwLock::new(initial))
    }

    pub(crate) async fn get(&self) -> Option<String> {
        self.0.read().await.clone()
    }

    /// Last writer wins when concurrent requests refresh at the same time.
    pub(crate) async fn set(&self, token: String) {
        *self.0.write().await = Some(token);
    }
}

/// Reads a non-empty session token from response headers.
pub(crate) fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Returns the token the daemon handed out when the response is an invalidation.
pub(crate) fn rotated_token(status: StatusCode, headers: &HeaderMap) -> Option<String> {
    if status == StatusCode::CONFLICT {
        session_id(headers)
    } else {
        None
    }
}

/// Interprets the daemon's answer to a token probe.
pub(crate) fn token_from_probe(status: StatusCode, headers: &HeaderMap) -> Result<String, RpcError> {
    let code = status.as_u16();
    if status == StatusCode::UNAUTHORIZED {
        return Err(RpcError::Unauthorized("authorization failed".into()));
    }
    if status.is_server_error() {
        return Err(RpcError::status(
            code,
            format!("server error trying to obtain token, status code: {code}"),
        ));
    }

    rotated_token(status, headers).ok_or_else(|| {
        RpcError::status(
            code,
            format!("unexpected response trying to obtain token, status code: {code}"),
        )
    })
}
