use super::RecordType;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsRecord {
    pub record_type: RecordType,

    pub value: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// MX alias of `value`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,

    /// SRV alias of `value`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl DnsRecord {
    pub fn new(record_type: RecordType, value: impl Into<String>) -> Self {
        Self {
            record_type,
            value: value.into(),
            ttl: None,
            priority: None,
            weight: None,
            port: None,
            exchange: None,
            target: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Option<u32>) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn mx(exchange: impl Into<String>, priority: u16, ttl: Option<u32>) -> Self {
        let exchange = exchange.into();
        Self {
            priority: Some(priority),
            exchange: Some(exchange.clone()),
            ttl,
            ..Self::new(RecordType::MX, exchange)
        }
    }

    pub fn srv(
        target: impl Into<String>,
        priority: u16,
        weight: u16,
        port: u16,
        ttl: Option<u32>,
    ) -> Self {
        let target = target.into();
        Self {
            priority: Some(priority),
            weight: Some(weight),
            port: Some(port),
            target: Some(target.clone()),
            ttl,
            ..Self::new(RecordType::SRV, target)
        }
    }
}
