//! Ferrous Resolve Domain Layer
pub mod cname_chain;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod dns_response;
pub mod errors;

pub use cname_chain::{ChainValidation, CnameChainResult};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::{normalize_domain, DnsQuery};
pub use dns_record::{normalize_ipv6, DnsRecord, RecordType};
pub use dns_response::{DnsResponse, ResolutionStatus};
pub use errors::{DomainError, ResolutionErrorKind};
