use super::RecordType;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<Arc<str>>,
}

impl DnsQuery {
    /// Builds a query; the domain is normalized on the way in.
    pub fn new(domain: impl AsRef<str>, record_type: RecordType) -> Self {
        Self {
            domain: Arc::from(normalize_domain(domain.as_ref())),
            record_type,
            server: None,
        }
    }

    pub fn with_server(mut self, server: impl Into<Arc<str>>) -> Self {
        self.server = Some(server.into());
        self
    }
}

/// Trims whitespace, drops a trailing root dot and lower-cases.
pub fn normalize_domain(domain: &str) -> String {
    let trimmed = domain.trim();
    trimmed
        .strip_suffix('.')
        .unwrap_or(trimmed)
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("  WWW.Example.COM. "), "www.example.com");
        assert_eq!(normalize_domain("example.com"), "example.com");
    }

    #[test]
    fn test_query_identity_ignores_case() {
        let a = DnsQuery::new("Example.com", RecordType::A);
        let b = DnsQuery::new("example.com.", RecordType::A);
        assert_eq!(a, b);
    }
}
