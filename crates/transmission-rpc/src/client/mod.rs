//! Transmission RPC client implementation.

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use transmission_types::{RpcError, Session, SessionStats, Torrent, TransmissionRpc};

use crate::command::{self, Request, RpcSession, RpcSessionStats, TorrentGetResponse};
use crate::ops::RpcTransport;
use crate::transport::{Credentials, HttpTransport};


/// RpcClient queries a Transmission daemon with typed commands.
#[allow(missing_debug_implementations, private_bounds)]
pub struct RpcClient<T: RpcTransport = HttpTransport> {
    transport: T,
}

impl RpcClient {
    /// Create a new RpcClient for the daemon at `base_url`.
    ///
    /// No request is made here; the session token is obtained on first use.
    pub fn try_new(base_url: &str, credentials: Option<Credentials>) -> Result<Self, RpcError> {
        let transport = HttpTransport::try_new(base_url, credentials)?;
        debug!("Transmission RPC endpoint is {}", transport.url());
        Ok(Self { transport })
    }

    /// Create an RpcClient over an already configured transport.
    pub fn from_transport(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }
}

#[allow(private_bounds)]
impl<T: RpcTransport> RpcClient<T> {
    /// Create an RpcClient with a custom transport implementation.
    /// This is primarily useful for testing with mocks.
    #[cfg(test)]
    pub(crate) fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    async fn call<A, R>(&self, request: Request<A>) -> Result<R, RpcError>
    where
        A: Serialize,
        R: DeserializeOwned + Default,
    {
        let payload = serde_json::to_vec(&request)
            .map_err(|e| RpcError::Decode(format!("failed to encode {}: {e}", request.method)))?;

        debug!("Sending {}", request.method);
        let body = self.transport.execute(&payload).await?;
        command::decode(&body)
    }
}

#[allow(private_bounds)]
impl<T: RpcTransport> TransmissionRpc for RpcClient<T> {
    async fn torrents(&self) -> Result<Vec<Torrent>, RpcError> {
        let response: TorrentGetResponse = self.call(Request::torrent_get()).await?;
        let torrents: Vec<Torrent> = response.into();
        debug!("Received {} torrents", torrents.len());

        Ok(torrents)
    }

    async fn session(&self) -> Result<Session, RpcError> {
        let session: RpcSession = self.call(Request::session_get()).await?;
        debug!("Session settings: {session:?}");

        Ok(session.into())
    }

    async fn session_stats(&self) -> Result<SessionStats, RpcError> {
        let stats: RpcSessionStats = self.call(Request::session_stats()).await?;
        debug!("Session statistics: {stats:?}");

        Ok(stats.into())
    }
}
