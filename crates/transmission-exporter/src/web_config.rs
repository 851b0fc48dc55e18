//! Web configuration file in the Prometheus exporter-toolkit format.
//!
//! ```yaml
//! tls_server_config:
//!   cert_file: server.crt
//!   key_file: server.key
//! basic_auth_users:
//!   prometheus: $2y$10$...
//! ```
//!
//! Both sections are optional. Relative certificate paths are resolved against
//! the directory of the configuration file. Passwords are bcrypt hashes.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    Router,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use axum_server::tls_rustls::RustlsConfig;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Deserialize;
use tracing::{error, warn};

use crate::ExporterError;

/// Parsed web configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WebConfig {
    /// Serve over TLS with this certificate.
    #[serde(default)]
    pub tls_server_config: Option<TlsServerConfig>,
    /// Username to bcrypt hash. Empty disables authentication.
    #[serde(default)]
    pub basic_auth_users: BTreeMap<String, String>,
}

/// Certificate and private key, both PEM encoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TlsServerConfig {
    /// Certificate chain served to clients.
    pub cert_file: PathBuf,
    /// Private key of the certificate.
    pub key_file: PathBuf,
}

impl WebConfig {
    /// Read and validate the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ExporterError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ExporterError::WebConfig(format!("{}: {e}", path.display())))?;
        let mut config = Self::parse(&text)
            .map_err(|e| ExporterError::WebConfig(format!("{}: {e}", path.display())))?;

        if let Some(tls) = &mut config.tls_server_config {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            tls.cert_file = base.join(&tls.cert_file);
            tls.key_file = base.join(&tls.key_file);
        }
        Ok(config)
    }

    /// Parse the YAML text of a configuration file.
    pub fn parse(text: &str) -> Result<Self, String> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
        if let Some(tls) = &config.tls_server_config {
            if tls.cert_file.as_os_str().is_empty() {
                return Err("tls_server_config: cert_file must not be empty".to_string());
            }
            if tls.key_file.as_os_str().is_empty() {
                return Err("tls_server_config: key_file must not be empty".to_string());
            }
        }
        for (username, hash) in &config.basic_auth_users {
            if hash.is_empty() {
                return Err(format!("basic_auth_users: empty password hash for {username}"));
            }
        }
        Ok(config)
    }

    /// Load the certificate and key, if TLS is configured.
    pub async fn rustls_config(&self) -> Result<Option<RustlsConfig>, ExporterError> {
        let Some(tls) = &self.tls_server_config else {
            return Ok(None);
        };

        // Errs when a provider is already installed.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let config = RustlsConfig::from_pem_file(&tls.cert_file, &tls.key_file)
            .await
            .map_err(|e| {
                ExporterError::WebConfig(format!(
                    "failed to load {} and {}: {e}",
                    tls.cert_file.display(),
                    tls.key_file.display()
                ))
            })?;
        Ok(Some(config))
    }

    /// Require basic authentication on every route of `router`, when users are configured.
    pub fn protect(&self, router: Router) -> Router {
        if self.basic_auth_users.is_empty() {
            return router;
        }
        let users: Users = Arc::new(self.basic_auth_users.clone());
        router.layer(middleware::from_fn_with_state(users, basic_auth))
    }
}

type Users = Arc<BTreeMap<String, String>>;

async fn basic_auth(State(users): State<Users>, request: Request, next: Next) -> Response {
    let credentials = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(decode_basic);
    let Some((username, password)) = credentials else {
        return challenge();
    };
    let Some(hash) = users.get(&username).cloned() else {
        warn!(username, "Unknown user on the metrics endpoint");
        return challenge();
    };

    // bcrypt verification blocks.
    match tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await {
        Ok(Ok(true)) => next.run(request).await,
        Ok(Ok(false)) => {
            warn!(username, "Wrong password on the metrics endpoint");
            challenge()
        }
        Ok(Err(e)) => {
            error!(username, error = %e, "Unusable password hash in web config");
            challenge()
        }
        Err(e) => {
            error!("Password verification task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn challenge() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic")],
        "Unauthorized",
    )
        .into_response()
}

fn decode_basic(value: &str) -> Option<(String, String)> {
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}
