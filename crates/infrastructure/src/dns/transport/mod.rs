pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use ferrous_resolve_application::ports::ProviderError;
use std::time::Duration;

pub use tcp::TcpTransport;
pub use udp::UdpTransport;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

/// One request/response exchange with a single upstream.
///
/// Expiry of `timeout` is reported as a `Timeout` provider error; every other
/// I/O fault as `Other`.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, ProviderError>;

    fn protocol_name(&self) -> &'static str;
}
