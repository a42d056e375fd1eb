use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid record type: {0}")]
    InvalidRecordType(String),

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Why a single lookup did not produce records.
///
/// Carried on failed [`DnsResponse`](crate::DnsResponse)s so callers can tell
/// a definitive answer (`NotFound`, `NoData`) from a transient one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionErrorKind {
    NotFound,
    NoData,
    ServerFailure,
    Timeout,
    Unsupported,
    Unknown,
}

impl ResolutionErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionErrorKind::NotFound => "not_found",
            ResolutionErrorKind::NoData => "no_data",
            ResolutionErrorKind::ServerFailure => "server_failure",
            ResolutionErrorKind::Timeout => "timeout",
            ResolutionErrorKind::Unsupported => "unsupported",
            ResolutionErrorKind::Unknown => "unknown",
        }
    }

    /// Transient failures are worth another attempt; the others are answers.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ResolutionErrorKind::Timeout
                | ResolutionErrorKind::ServerFailure
                | ResolutionErrorKind::Unknown
        )
    }
}

impl fmt::Display for ResolutionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
