mod address;
mod record;
mod record_type;

pub use address::normalize_ipv6;
pub use record::DnsRecord;
pub use record_type::RecordType;
