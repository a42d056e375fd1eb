use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CnameChainResult {
    /// Domains visited, in order; the first element is the requested domain.
    pub chain: Vec<String>,
    pub final_target: Option<String>,
    pub has_loop: bool,
    pub max_depth_reached: bool,
    pub resolution_time_ms: u64,
    /// Provider fault that cut the trace short.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CnameChainResult {
    /// Chain holding only the requested domain, nothing learned about it.
    pub fn unresolved(domain: impl Into<String>, error: Option<String>) -> Self {
        Self {
            chain: vec![domain.into()],
            final_target: None,
            has_loop: false,
            max_depth_reached: false,
            resolution_time_ms: 0,
            error,
        }
    }

    pub fn requested_domain(&self) -> &str {
        self.chain.first().map(String::as_str).unwrap_or_default()
    }

    /// Number of alias indirections followed.
    pub fn hops(&self) -> usize {
        self.chain.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ChainValidation {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}
