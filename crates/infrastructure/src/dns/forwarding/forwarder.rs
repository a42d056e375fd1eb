use super::message_builder::MessageBuilder;
use super::response_parser::{ResponseParser, UpstreamReply};
use crate::dns::transport::{DnsTransport, TcpTransport, UdpTransport};
use ferrous_resolve_application::ports::ProviderError;
use ferrous_resolve_domain::RecordType;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

/// Sends one query to one upstream: UDP first, TCP when the reply comes back
/// truncated.
pub struct DnsForwarder {
    attempt_timeout: Duration,
}

impl DnsForwarder {
    pub fn new(attempt_timeout: Duration) -> Self {
        Self { attempt_timeout }
    }

    pub async fn query(
        &self,
        server: SocketAddr,
        domain: &str,
        record_type: RecordType,
    ) -> Result<UpstreamReply, ProviderError> {
        let (id, request_bytes) = MessageBuilder::build_query(domain, record_type)?;

        let udp = UdpTransport::new(server);
        let reply = self.exchange(&udp, id, &request_bytes).await?;
        if !reply.truncated {
            return Ok(reply);
        }

        debug!(
            server = %server,
            domain = %domain,
            record_type = %record_type,
            "Truncated UDP response, retrying over TCP"
        );
        let tcp = TcpTransport::new(server);
        self.exchange(&tcp, id, &request_bytes).await
    }

    async fn exchange(
        &self,
        transport: &dyn DnsTransport,
        id: u16,
        request_bytes: &[u8],
    ) -> Result<UpstreamReply, ProviderError> {
        let response = transport.send(request_bytes, self.attempt_timeout).await?;
        let reply = ResponseParser::parse(&response.bytes)?;

        if reply.id != id {
            return Err(ProviderError::other(format!(
                "{} response id {} does not match query id {}",
                response.protocol_used, reply.id, id
            )));
        }

        Ok(reply)
    }
}
