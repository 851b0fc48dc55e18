//! # Transmission RPC client.
//!
//! Talks to a Transmission daemon over its JSON RPC API, taking care of the
//! `X-Transmission-Session-Id` handshake the daemon uses against CSRF.
//!
//! usage:
//!
//! ```rust,ignore
//! use transmission_rpc::{Credentials, RpcClient};
//! use transmission_types::TransmissionRpc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::from_parts(Some("admin".into()), Some("secret".into()));
//!     let client = RpcClient::try_new("http://localhost:9091", credentials)?;
//!     for torrent in client.torrents().await? {
//!         println!("{} {:.1}%", torrent.name, torrent.percent_done * 100.0);
//!     }
//!     Ok(())
//! }
//! ```
//!

#[cfg(test)]
use {test_log as _, tracing_subscriber as _, wiremock as _};

mod client;
mod command;
mod conversions;
mod ops;
mod token;
mod transport;

#[cfg(test)]
mod testutil;

pub use client::RpcClient;
pub use token::SESSION_ID_HEADER;
pub use transport::{Credentials, HttpTransport, RPC_PATH};
