//! HTTP transport: authenticated requests, token refresh and the single retry.

use std::fmt;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::debug;
use url::Url;

use transmission_types::RpcError;

use crate::token::{SESSION_ID_HEADER, SessionToken, rotated_token, token_from_probe};

/// Path of the RPC endpoint, appended to the daemon's base address.
pub const RPC_PATH: &str = "/transmission/rpc/";

/// Longest response body quoted back in a transport error.
const BODY_SNIPPET_LEN: usize = 256;

/// Username and password for the daemon's basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create a credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Build credentials only when both parts are present and non-empty.
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        match (username, password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Self { username, password })
            }
            _ => None,
        }
    }

    /// The username.
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Executes raw RPC payloads against a Transmission daemon.
///
/// Holds the session token. A request carries the stored token; when none is
/// stored yet, one is obtained with a probe request first. A `409 Conflict`
/// carrying a new token is answered by storing it and resending exactly once.
#[derive(Debug)]
pub struct HttpTransport {
    http: Client,
    url: Url,
    credentials: Option<Credentials>,
    token: SessionToken,
}

impl HttpTransport {
    /// Create a transport for the daemon at `base_url`, e.g. `http://localhost:9091`.
    pub fn try_new(base_url: &str, credentials: Option<Credentials>) -> Result<Self, RpcError> {
        let url = rpc_url(base_url)?;
        let http = Client::builder()
            .user_agent(concat!("transmission-exporter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RpcError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            url,
            credentials,
            token: SessionToken::default(),
        })
    }

    /// Start from a known session token instead of probing for one.
    pub fn with_session_token(self, token: impl Into<String>) -> Self {
        Self {
            token: SessionToken::new(Some(token.into())),
            ..self
        }
    }

    /// Full URL of the RPC endpoint.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The currently stored session token, if one was obtained.
    pub async fn session_token(&self) -> Option<String> {
        self.token.get().await
    }

    /// Obtain a fresh session token from the daemon and store it.
    ///
    /// The stored token is left untouched on failure.
    pub async fn ensure_token(&self) -> Result<String, RpcError> {
        debug!(url = %self.url, "requesting session token");
        let response = self
            .authenticate(self.http.post(self.url.clone()))
            .send()
            .await
            .map_err(network_error)?;

        let token = token_from_probe(response.status(), response.headers())?;
        debug!("obtained session token");
        self.token.set(token.clone()).await;
        Ok(token)
    }

    /// Send `payload` to the RPC endpoint and return the raw response body.
    pub async fn execute(&self, payload: &[u8]) -> Result<Vec<u8>, RpcError> {
        let token = match self.token.get().await {
            Some(token) => token,
            None => self.ensure_token().await?,
        };

        let response = self.send(&token, payload).await?;
        let response = match rotated_token(response.status(), response.headers()) {
            Some(fresh) => {
                debug!("session token rejected, retrying with the new one");
                self.token.set(fresh.clone()).await;
                self.send(&fresh, payload).await?
            }
            None => response,
        };

        read_body(response).await
    }

    async fn send(&self, token: &str, payload: &[u8]) -> Result<Response, RpcError> {
        let request = self
            .http
            .post(self.url.clone())
            .header(SESSION_ID_HEADER, token)
            .body(payload.to_vec());

        self.authenticate(request)
            .send()
            .await
            .map_err(network_error)
    }

    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(credentials) => request.basic_auth(&credentials.username, Some(&credentials.password)),
            None => request,
        }
    }
}

/// Turns the final response of a request into its body or an error.
async fn read_body(response: Response) -> Result<Vec<u8>, RpcError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(RpcError::Unauthorized(
            "request failed: authentication error".into(),
        ));
    }

    let body = response.bytes().await.map_err(network_error)?;
    if !status.is_success() {
        let code = status.as_u16();
        let text: String = String::from_utf8_lossy(&body)
            .trim()
            .chars()
            .take(BODY_SNIPPET_LEN)
            .collect();
        return Err(RpcError::status(
            code,
            format!("request failed, status code: {code}, body: {text}"),
        ));
    }

    debug!(status = status.as_u16(), len = body.len(), "RPC response");
    Ok(body.to_vec())
}

fn network_error(err: reqwest::Error) -> RpcError {
    RpcError::network(format!("network error: {err}"))
}

/// Appends [`RPC_PATH`] to the daemon's base address.
fn rpc_url(base_url: &str) -> Result<Url, RpcError> {
    let joined = format!("{}{RPC_PATH}", base_url.trim_end_matches('/'));
    let url = Url::parse(&joined).map_err(|e| RpcError::InvalidUrl(format!("{base_url}: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(RpcError::InvalidUrl(format!(
            "{base_url}: unsupported scheme {scheme}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_url_appends_endpoint() {
        let url = rpc_url("http://example.com").unwrap();
        assert_eq!(url.as_str(), "http://example.com/transmission/rpc/");

        let url = rpc_url("http://example.com:9091/").unwrap();
        assert_eq!(url.as_str(), "http://example.com:9091/transmission/rpc/");
    }

    #[test]
    fn rpc_url_rejects_garbage() {
        assert!(matches!(rpc_url("not a url"), Err(RpcError::InvalidUrl(_))));
        assert!(matches!(
            rpc_url("ftp://example.com"),
            Err(RpcError::InvalidUrl(_))
        ));
    }

    #[test]
    fn credentials_need_both_parts() {
        assert!(Credentials::from_parts(Some("test".into()), Some("pass".into())).is_some());
        assert!(Credentials::from_parts(Some("test".into()), None).is_none());
        assert!(Credentials::from_parts(Some(String::new()), Some("pass".into())).is_none());
        assert!(Credentials::from_parts(None, None).is_none());
    }

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = Credentials::new("test", "hunter2");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("test"));
        assert!(!debug.contains("hunter2"));
    }

    #[tokio::test]
    async fn new_transport_has_no_token() {
        let transport = HttpTransport::try_new("http://example.com", None).unwrap();
        assert_eq!(transport.session_token().await, None);

        let transport = transport.with_session_token("existing-token-123");
        assert_eq!(
            transport.session_token().await.as_deref(),
            Some("existing-token-123")
        );
    }
}
