#![allow(dead_code)]
use ferrous_resolve_domain::{CnameChainResult, DnsQuery, DnsRecord, DnsResponse, RecordType};

pub struct ChainBuilder {
    chain: Vec<String>,
    final_target: Option<String>,
    has_loop: bool,
    max_depth_reached: bool,
    resolution_time_ms: u64,
}

impl ChainBuilder {
    pub fn new(domain: &str) -> Self {
        Self {
            chain: vec![domain.to_string()],
            final_target: Some(domain.to_string()),
            has_loop: false,
            max_depth_reached: false,
            resolution_time_ms: 10,
        }
    }

    pub fn hop(mut self, domain: &str) -> Self {
        self.chain.push(domain.to_string());
        self.final_target = Some(domain.to_string());
        self
    }

    pub fn looped(mut self) -> Self {
        self.has_loop = true;
        self.final_target = None;
        self
    }

    pub fn depth_exhausted(mut self) -> Self {
        self.max_depth_reached = true;
        self.final_target = None;
        self
    }

    pub fn unresolved(mut self) -> Self {
        self.final_target = None;
        self
    }

    pub fn took_ms(mut self, ms: u64) -> Self {
        self.resolution_time_ms = ms;
        self
    }

    pub fn build(self) -> CnameChainResult {
        CnameChainResult {
            chain: self.chain,
            final_target: self.final_target,
            has_loop: self.has_loop,
            max_depth_reached: self.max_depth_reached,
            resolution_time_ms: self.resolution_time_ms,
            error: None,
        }
    }
}

pub fn a_response(domain: &str, addresses: &[&str], ttl: u32) -> DnsResponse {
    let records = addresses
        .iter()
        .map(|ip| DnsRecord::new(RecordType::A, *ip).with_ttl(Some(ttl)))
        .collect();
    DnsResponse::success(DnsQuery::new(domain, RecordType::A), records, 12)
}
