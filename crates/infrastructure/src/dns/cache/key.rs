use compact_str::CompactString;
use ferrous_resolve_domain::{DnsQuery, RecordType};
use std::hash::{Hash, Hasher};

#[derive(Clone, Debug, Eq)]
pub struct CacheKey {
    pub domain: CompactString,
    pub record_type: RecordType,
}

impl CacheKey {
    /// `domain` must already be normalized.
    #[inline]
    pub fn new(domain: &str, record_type: RecordType) -> Self {
        Self {
            domain: CompactString::from(domain),
            record_type,
        }
    }

    /// The upstream override is not part of the key.
    #[inline]
    pub fn from_query(query: &DnsQuery) -> Self {
        Self::new(&query.domain, query.record_type)
    }

    #[inline]
    pub fn matches(&self, domain: Option<&str>, record_type: Option<RecordType>) -> bool {
        domain.map_or(true, |d| self.domain == d)
            && record_type.map_or(true, |rt| self.record_type == rt)
    }
}

impl Hash for CacheKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.domain.as_str().hash(state);
        std::mem::discriminant(&self.record_type).hash(state);
    }
}

impl PartialEq for CacheKey {
    #[inline]
    fn eq(&self, other: &CacheKey) -> bool {
        self.record_type == other.record_type && self.domain == other.domain
    }
}
