use async_trait::async_trait;
use std::fmt;
use std::net::IpAddr;
use thiserror::Error;

/// Name to look up, plus an optional `host:port` that overrides the
/// provider's configured upstreams for this one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTarget<'a> {
    pub domain: &'a str,
    pub server: Option<&'a str>,
}

impl<'a> LookupTarget<'a> {
    pub fn new(domain: &'a str) -> Self {
        Self {
            domain,
            server: None,
        }
    }

    pub fn with_server(mut self, server: Option<&'a str>) -> Self {
        self.server = server;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressAnswer {
    pub address: IpAddr,
    pub ttl: Option<u32>,
}

/// Host name answer (CNAME, NS, PTR).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameAnswer {
    pub name: String,
    pub ttl: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxAnswer {
    pub exchange: String,
    pub preference: u16,
    pub ttl: Option<u32>,
}

/// One TXT record; character-strings kept as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxtAnswer {
    pub segments: Vec<String>,
    pub ttl: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrvAnswer {
    pub target: String,
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub ttl: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaAnswer {
    pub mname: String,
    pub rname: String,
    pub serial: u32,
    pub refresh: i32,
    pub retry: i32,
    pub expire: i32,
    pub minimum: u32,
    pub ttl: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    /// NXDOMAIN
    NotFound,
    /// Name exists, no records of the requested type.
    NoData,
    ServerFailure,
    Timeout,
    Refused,
    Other,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProviderErrorKind::NotFound => "not_found",
            ProviderErrorKind::NoData => "no_data",
            ProviderErrorKind::ServerFailure => "server_failure",
            ProviderErrorKind::Timeout => "timeout",
            ProviderErrorKind::Refused => "refused",
            ProviderErrorKind::Other => "other",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(domain: &str) -> Self {
        Self::new(ProviderErrorKind::NotFound, format!("NXDOMAIN for {}", domain))
    }

    pub fn no_data(domain: &str) -> Self {
        Self::new(ProviderErrorKind::NoData, format!("no data for {}", domain))
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Timeout, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Other, message)
    }

    fn not_implemented(operation: &str) -> Self {
        Self::other(format!("{} is not implemented by this provider", operation))
    }
}

/// Upstream capability performing the actual round trip, one operation per
/// record type. CAA has no operation.
///
/// Every method defaults to a "not implemented" error so partial providers
/// only override what they answer.
#[async_trait]
pub trait NameResolutionProvider: Send + Sync {
    async fn resolve_a(
        &self,
        _target: &LookupTarget<'_>,
    ) -> Result<Vec<AddressAnswer>, ProviderError> {
        Err(ProviderError::not_implemented("resolve_a"))
    }

    async fn resolve_aaaa(
        &self,
        _target: &LookupTarget<'_>,
    ) -> Result<Vec<AddressAnswer>, ProviderError> {
        Err(ProviderError::not_implemented("resolve_aaaa"))
    }

    async fn resolve_cname(
        &self,
        _target: &LookupTarget<'_>,
    ) -> Result<Vec<NameAnswer>, ProviderError> {
        Err(ProviderError::not_implemented("resolve_cname"))
    }

    async fn resolve_mx(&self, _target: &LookupTarget<'_>) -> Result<Vec<MxAnswer>, ProviderError> {
        Err(ProviderError::not_implemented("resolve_mx"))
    }

    async fn resolve_txt(
        &self,
        _target: &LookupTarget<'_>,
    ) -> Result<Vec<TxtAnswer>, ProviderError> {
        Err(ProviderError::not_implemented("resolve_txt"))
    }

    async fn resolve_ns(
        &self,
        _target: &LookupTarget<'_>,
    ) -> Result<Vec<NameAnswer>, ProviderError> {
        Err(ProviderError::not_implemented("resolve_ns"))
    }

    async fn resolve_soa(&self, _target: &LookupTarget<'_>) -> Result<SoaAnswer, ProviderError> {
        Err(ProviderError::not_implemented("resolve_soa"))
    }

    async fn resolve_srv(
        &self,
        _target: &LookupTarget<'_>,
    ) -> Result<Vec<SrvAnswer>, ProviderError> {
        Err(ProviderError::not_implemented("resolve_srv"))
    }

    async fn resolve_ptr(
        &self,
        _target: &LookupTarget<'_>,
    ) -> Result<Vec<NameAnswer>, ProviderError> {
        Err(ProviderError::not_implemented("resolve_ptr"))
    }
}
