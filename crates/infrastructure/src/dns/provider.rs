use crate::dns::forwarding::{DnsForwarder, UpstreamReply};
use async_trait::async_trait;
use ferrous_resolve_application::ports::{
    AddressAnswer, LookupTarget, MxAnswer, NameAnswer, NameResolutionProvider, ProviderError,
    SoaAnswer, SrvAnswer, TxtAnswer,
};
use ferrous_resolve_domain::{DomainError, RecordType};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::{debug, info, warn};

const DEFAULT_DNS_PORT: u16 = 53;

/// Name resolution provider speaking the DNS wire protocol to a fixed list
/// of upstreams.
///
/// Servers are tried in order; the next one is used only when the previous
/// one could not be reached. A response code is an answer and ends the walk.
pub struct HickoryProvider {
    servers: Vec<SocketAddr>,
    forwarder: DnsForwarder,
}

impl HickoryProvider {
    pub fn new(servers: Vec<SocketAddr>, attempt_timeout: Duration) -> Self {
        info!(
            servers = servers.len(),
            attempt_timeout_ms = attempt_timeout.as_millis() as u64,
            "Hickory provider created"
        );
        Self {
            servers,
            forwarder: DnsForwarder::new(attempt_timeout),
        }
    }

    /// Parses `ip:port` (or bare `ip`, port 53) server strings.
    pub fn from_addresses(
        servers: &[String],
        attempt_timeout: Duration,
    ) -> Result<Self, DomainError> {
        let parsed = servers
            .iter()
            .map(|server| {
                parse_server(server).ok_or_else(|| {
                    DomainError::ConfigError(format!("invalid upstream server '{}'", server))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if parsed.is_empty() {
            return Err(DomainError::ConfigError(
                "no upstream servers configured".to_string(),
            ));
        }

        Ok(Self::new(parsed, attempt_timeout))
    }

    async fn exchange(
        &self,
        target: &LookupTarget<'_>,
        record_type: RecordType,
    ) -> Result<UpstreamReply, ProviderError> {
        let servers = match target.server {
            Some(server) => vec![parse_server(server).ok_or_else(|| {
                ProviderError::other(format!("invalid server address '{}'", server))
            })?],
            None => self.servers.clone(),
        };

        let mut last_error = ProviderError::other("no upstream servers configured");

        for (position, server) in servers.iter().enumerate() {
            match self.forwarder.query(*server, target.domain, record_type).await {
                Ok(reply) => {
                    debug!(
                        server = %server,
                        domain = %target.domain,
                        record_type = %record_type,
                        rcode = ?reply.rcode,
                        answers = reply.answers.len(),
                        "Upstream answered"
                    );
                    reply.check_rcode(target.domain)?;
                    return Ok(reply);
                }
                Err(e) => {
                    warn!(
                        server = %server,
                        domain = %target.domain,
                        position,
                        error = %e,
                        "Upstream unreachable, failing over"
                    );
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

fn parse_server(server: &str) -> Option<SocketAddr> {
    let server = server.trim();
    server
        .parse::<SocketAddr>()
        .ok()
        .or_else(|| {
            server
                .parse::<IpAddr>()
                .ok()
                .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        })
}

fn non_empty<T>(answers: Vec<T>, domain: &str) -> Result<Vec<T>, ProviderError> {
    if answers.is_empty() {
        Err(ProviderError::no_data(domain))
    } else {
        Ok(answers)
    }
}

#[async_trait]
impl NameResolutionProvider for HickoryProvider {
    async fn resolve_a(
        &self,
        target: &LookupTarget<'_>,
    ) -> Result<Vec<AddressAnswer>, ProviderError> {
        let reply = self.exchange(target, RecordType::A).await?;
        let answers = reply
            .addresses()
            .into_iter()
            .filter(|answer| answer.address.is_ipv4())
            .collect();
        non_empty(answers, target.domain)
    }

    async fn resolve_aaaa(
        &self,
        target: &LookupTarget<'_>,
    ) -> Result<Vec<AddressAnswer>, ProviderError> {
        let reply = self.exchange(target, RecordType::AAAA).await?;
        let answers = reply
            .addresses()
            .into_iter()
            .filter(|answer| answer.address.is_ipv6())
            .collect();
        non_empty(answers, target.domain)
    }

    async fn resolve_cname(
        &self,
        target: &LookupTarget<'_>,
    ) -> Result<Vec<NameAnswer>, ProviderError> {
        let reply = self.exchange(target, RecordType::CNAME).await?;
        non_empty(reply.cnames(), target.domain)
    }

    async fn resolve_mx(&self, target: &LookupTarget<'_>) -> Result<Vec<MxAnswer>, ProviderError> {
        let reply = self.exchange(target, RecordType::MX).await?;
        non_empty(reply.mail_exchangers(), target.domain)
    }

    async fn resolve_txt(
        &self,
        target: &LookupTarget<'_>,
    ) -> Result<Vec<TxtAnswer>, ProviderError> {
        let reply = self.exchange(target, RecordType::TXT).await?;
        non_empty(reply.texts(), target.domain)
    }

    async fn resolve_ns(
        &self,
        target: &LookupTarget<'_>,
    ) -> Result<Vec<NameAnswer>, ProviderError> {
        let reply = self.exchange(target, RecordType::NS).await?;
        non_empty(reply.name_servers(), target.domain)
    }

    async fn resolve_soa(&self, target: &LookupTarget<'_>) -> Result<SoaAnswer, ProviderError> {
        let reply = self.exchange(target, RecordType::SOA).await?;
        reply
            .soa()
            .ok_or_else(|| ProviderError::no_data(target.domain))
    }

    async fn resolve_srv(
        &self,
        target: &LookupTarget<'_>,
    ) -> Result<Vec<SrvAnswer>, ProviderError> {
        let reply = self.exchange(target, RecordType::SRV).await?;
        non_empty(reply.services(), target.domain)
    }

    async fn resolve_ptr(
        &self,
        target: &LookupTarget<'_>,
    ) -> Result<Vec<NameAnswer>, ProviderError> {
        let reply = self.exchange(target, RecordType::PTR).await?;
        non_empty(reply.pointers(), target.domain)
    }
}
