use ferrous_resolve_domain::DnsResponse;
use std::time::{Duration, Instant};

/// TTL used when the first record of a response carries none.
const RECORD_TTL_FALLBACK_SECS: u32 = 300;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub response: DnsResponse,
    pub inserted_at: Instant,
    pub expires_at: Instant,
}

impl CacheEntry {
    /// Lifetime comes from the first record's TTL; a response without
    /// records lives for `default_ttl`.
    pub fn new(response: DnsResponse, default_ttl: Duration) -> Self {
        let inserted_at = Instant::now();
        let ttl = match response.records.first() {
            Some(record) => Duration::from_secs(
                record.ttl.unwrap_or(RECORD_TTL_FALLBACK_SECS) as u64,
            ),
            None => default_ttl,
        };

        Self {
            response,
            inserted_at,
            expires_at: inserted_at + ttl,
        }
    }

    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now > self.expires_at
    }

    pub fn remaining_ttl(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
