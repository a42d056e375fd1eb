use crate::{DnsQuery, DnsRecord, ResolutionErrorKind};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStatus {
    Success,
    Error,
    Timeout,
}

impl ResolutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStatus::Success => "success",
            ResolutionStatus::Error => "error",
            ResolutionStatus::Timeout => "timeout",
        }
    }
}

impl fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one (domain, type) lookup.
///
/// Failures are values, not errors: a failed lookup carries `Error` or
/// `Timeout`, a message, and no records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DnsResponse {
    pub query: DnsQuery,
    pub records: Vec<DnsRecord>,
    pub response_time_ms: u64,
    pub status: ResolutionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ResolutionErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cname_chain: Option<Vec<String>>,
}

impl DnsResponse {
    pub fn success(query: DnsQuery, records: Vec<DnsRecord>, response_time_ms: u64) -> Self {
        Self {
            query,
            records,
            response_time_ms,
            status: ResolutionStatus::Success,
            error: None,
            error_kind: None,
            cname_chain: None,
        }
    }

    pub fn failure(
        query: DnsQuery,
        kind: ResolutionErrorKind,
        message: impl Into<String>,
        response_time_ms: u64,
    ) -> Self {
        let status = if kind == ResolutionErrorKind::Timeout {
            ResolutionStatus::Timeout
        } else {
            ResolutionStatus::Error
        };

        Self {
            query,
            records: Vec::new(),
            response_time_ms,
            status,
            error: Some(message.into()),
            error_kind: Some(kind),
            cname_chain: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResolutionStatus::Success
    }

    /// Failed with a kind that may clear up on another attempt.
    pub fn is_transient_failure(&self) -> bool {
        self.error_kind.is_some_and(|kind| kind.is_transient())
    }

    pub fn with_response_time(mut self, response_time_ms: u64) -> Self {
        self.response_time_ms = response_time_ms;
        self
    }

    pub fn with_cname_chain(mut self, chain: Vec<String>) -> Self {
        self.cname_chain = Some(chain);
        self
    }
}
