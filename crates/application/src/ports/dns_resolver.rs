use async_trait::async_trait;
use ferrous_resolve_domain::{DnsQuery, DnsResponse, DomainError};

#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Resolves one query.
    ///
    /// Lookup failures come back as a non-success [`DnsResponse`]; `Err` is
    /// reserved for record types the resolver cannot serve at all.
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResponse, DomainError>;
}
