use crate::DomainError;
use std::net::Ipv6Addr;

/// Canonical textual form of an IPv6 address: lower-case, zero runs
/// compressed (RFC 5952). Surrounding brackets are accepted.
pub fn normalize_ipv6(input: &str) -> Result<String, DomainError> {
    let trimmed = input.trim();
    let bare = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    bare.parse::<Ipv6Addr>()
        .map(|addr| addr.to_string())
        .map_err(|_| DomainError::InvalidIpAddress(input.to_string()))
}
