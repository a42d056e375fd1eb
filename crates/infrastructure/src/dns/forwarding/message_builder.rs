//! Wire-format query construction with `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use ferrous_resolve_application::ports::ProviderError;
use ferrous_resolve_domain::RecordType;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Builds a recursive query for `domain` and returns its random ID with
    /// the serialized bytes, so the caller can match the reply.
    pub fn build_query(
        domain: &str,
        record_type: RecordType,
    ) -> Result<(u16, Vec<u8>), ProviderError> {
        let name = Name::from_str(domain)
            .map_err(|e| ProviderError::other(format!("invalid domain '{}': {}", domain, e)))?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);
        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let bytes = Self::serialize(&message)?;
        Ok((id, bytes))
    }

    fn serialize(message: &Message) -> Result<Vec<u8>, ProviderError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message
            .emit(&mut encoder)
            .map_err(|e| ProviderError::other(format!("failed to serialize DNS message: {}", e)))?;

        Ok(buf)
    }
}
