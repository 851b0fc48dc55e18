use std::path::PathBuf;

use clap::Parser;

use transmission_exporter::{logging::LogFormat, server::normalize_metrics_path};
use transmission_rpc::Credentials;

/// Top-level CLI struct for the binary.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Base address of the Transmission daemon.
    #[arg(long, env = "TRANSMISSION_ADDR", default_value = "http://localhost:9091")]
    pub(crate) transmission_addr: String,

    /// Username for the daemon's RPC interface.
    #[arg(long, env = "TRANSMISSION_USERNAME")]
    pub(crate) transmission_username: Option<String>,

    /// Password for the daemon's RPC interface.
    #[arg(long, env = "TRANSMISSION_PASSWORD", hide_env_values = true)]
    pub(crate) transmission_password: Option<String>,

    /// Address to listen on, `:PORT` for all interfaces.
    #[arg(long, env = "WEB_ADDR", default_value = ":19091")]
    pub(crate) web_addr: String,

    /// Path the metrics are served at.
    #[arg(long, env = "WEB_PATH", default_value = "/metrics", value_parser = parse_web_path)]
    pub(crate) web_path: String,

    /// Web configuration file enabling TLS and basic authentication.
    #[arg(long, env = "WEB_CONFIG_FILE")]
    pub(crate) web_config_file: Option<PathBuf>,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub(crate) log_format: LogFormat,
}

impl Cli {
    /// Credentials to authenticate with, when both parts are set.
    pub(crate) fn credentials(&self) -> Option<Credentials> {
        Credentials::from_parts(
            self.transmission_username.clone(),
            self.transmission_password.clone(),
        )
    }
}

fn parse_web_path(path: &str) -> Result<String, String> {
    normalize_metrics_path(path).map_err(|e| e.to_string())
}
