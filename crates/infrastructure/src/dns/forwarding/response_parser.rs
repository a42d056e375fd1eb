use ferrous_resolve_application::ports::{
    AddressAnswer, MxAnswer, NameAnswer, ProviderError, ProviderErrorKind, SoaAnswer, SrvAnswer,
    TxtAnswer,
};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{RData, Record};
use std::net::IpAddr;
use tracing::debug;

/// Decoded upstream reply.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub id: u16,
    pub rcode: ResponseCode,
    pub truncated: bool,
    pub answers: Vec<Record>,
}

impl UpstreamReply {
    /// Maps a non-success response code to the provider error taxonomy.
    pub fn check_rcode(&self, domain: &str) -> Result<(), ProviderError> {
        match self.rcode {
            ResponseCode::NoError => Ok(()),
            ResponseCode::NXDomain => Err(ProviderError::not_found(domain)),
            ResponseCode::ServFail => Err(ProviderError::new(
                ProviderErrorKind::ServerFailure,
                format!("SERVFAIL for {}", domain),
            )),
            ResponseCode::Refused => Err(ProviderError::new(
                ProviderErrorKind::Refused,
                format!("REFUSED for {}", domain),
            )),
            other => Err(ProviderError::other(format!(
                "upstream answered {} for {}",
                ResponseParser::rcode_to_status(other),
                domain
            ))),
        }
    }

    pub fn addresses(&self) -> Vec<AddressAnswer> {
        self.answers
            .iter()
            .filter_map(|record| {
                let address = match record.data() {
                    RData::A(a) => IpAddr::V4(a.0),
                    RData::AAAA(aaaa) => IpAddr::V6(aaaa.0),
                    _ => return None,
                };
                Some(AddressAnswer {
                    address,
                    ttl: Some(record.ttl()),
                })
            })
            .collect()
    }

    pub fn cnames(&self) -> Vec<NameAnswer> {
        self.names(|data| match data {
            RData::CNAME(cname) => Some(cname.to_utf8()),
            _ => None,
        })
    }

    pub fn name_servers(&self) -> Vec<NameAnswer> {
        self.names(|data| match data {
            RData::NS(ns) => Some(ns.to_utf8()),
            _ => None,
        })
    }

    pub fn pointers(&self) -> Vec<NameAnswer> {
        self.names(|data| match data {
            RData::PTR(ptr) => Some(ptr.to_utf8()),
            _ => None,
        })
    }

    pub fn mail_exchangers(&self) -> Vec<MxAnswer> {
        self.answers
            .iter()
            .filter_map(|record| match record.data() {
                RData::MX(mx) => Some(MxAnswer {
                    exchange: trim_root(mx.exchange().to_utf8()),
                    preference: mx.preference(),
                    ttl: Some(record.ttl()),
                }),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<TxtAnswer> {
        self.answers
            .iter()
            .filter_map(|record| match record.data() {
                RData::TXT(txt) => Some(TxtAnswer {
                    segments: txt
                        .txt_data()
                        .iter()
                        .map(|segment| String::from_utf8_lossy(segment.as_ref()).into_owned())
                        .collect(),
                    ttl: Some(record.ttl()),
                }),
                _ => None,
            })
            .collect()
    }

    pub fn services(&self) -> Vec<SrvAnswer> {
        self.answers
            .iter()
            .filter_map(|record| match record.data() {
                RData::SRV(srv) => Some(SrvAnswer {
                    target: trim_root(srv.target().to_utf8()),
                    priority: srv.priority(),
                    weight: srv.weight(),
                    port: srv.port(),
                    ttl: Some(record.ttl()),
                }),
                _ => None,
            })
            .collect()
    }

    /// First SOA of the answer section.
    pub fn soa(&self) -> Option<SoaAnswer> {
        self.answers.iter().find_map(|record| match record.data() {
            RData::SOA(soa) => Some(SoaAnswer {
                mname: trim_root(soa.mname().to_utf8()),
                rname: trim_root(soa.rname().to_utf8()),
                serial: soa.serial(),
                refresh: soa.refresh(),
                retry: soa.retry(),
                expire: soa.expire(),
                minimum: soa.minimum(),
                ttl: Some(record.ttl()),
            }),
            _ => None,
        })
    }

    fn names(&self, extract: impl Fn(&RData) -> Option<String>) -> Vec<NameAnswer> {
        self.answers
            .iter()
            .filter_map(|record| {
                extract(record.data()).map(|name| NameAnswer {
                    name: trim_root(name),
                    ttl: Some(record.ttl()),
                })
            })
            .collect()
    }
}

fn trim_root(mut name: String) -> String {
    if name.len() > 1 && name.ends_with('.') {
        name.pop();
    }
    name
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<UpstreamReply, ProviderError> {
        let message = Message::from_vec(response_bytes)
            .map_err(|e| ProviderError::other(format!("failed to parse DNS response: {}", e)))?;

        let reply = UpstreamReply {
            id: message.id(),
            rcode: message.response_code(),
            truncated: message.truncated(),
            answers: message.answers().to_vec(),
        };

        debug!(
            rcode = ?reply.rcode,
            answers = reply.answers.len(),
            truncated = reply.truncated,
            "DNS response parsed"
        );

        Ok(reply)
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
