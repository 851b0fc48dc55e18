//! Internal trait abstracting the RPC round trip.
//!
//! This module provides the [`RpcTransport`] trait which abstracts the underlying
//! HTTP transport, enabling the typed commands to be tested against mocks.

use transmission_types::RpcError;

use crate::transport::HttpTransport;

/// Internal trait that abstracts executing a raw RPC payload.
/// This allows for mocking in tests.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub(crate) trait RpcTransport {
    async fn execute(&self, payload: &[u8]) -> Result<Vec<u8>, RpcError>;
}

impl RpcTransport for HttpTransport {
    async fn execute(&self, payload: &[u8]) -> Result<Vec<u8>, RpcError> {
        HttpTransport::execute(self, payload).await
    }
}
