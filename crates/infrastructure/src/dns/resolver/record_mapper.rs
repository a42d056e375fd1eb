use ferrous_resolve_application::ports::{
    AddressAnswer, MxAnswer, NameAnswer, SoaAnswer, SrvAnswer, TxtAnswer,
};
use ferrous_resolve_domain::{DnsRecord, RecordType};
use serde_json::json;
use std::net::IpAddr;

/// A and AAAA answers. IPv6 text is the canonical compressed form.
pub fn map_addresses(record_type: RecordType, answers: Vec<AddressAnswer>) -> Vec<DnsRecord> {
    answers
        .into_iter()
        .map(|answer| {
            let value = match answer.address {
                IpAddr::V4(v4) => v4.to_string(),
                IpAddr::V6(v6) => v6.to_string(),
            };
            DnsRecord::new(record_type, value).with_ttl(answer.ttl)
        })
        .collect()
}

/// CNAME, NS and PTR answers.
pub fn map_names(record_type: RecordType, answers: Vec<NameAnswer>) -> Vec<DnsRecord> {
    answers
        .into_iter()
        .map(|answer| DnsRecord::new(record_type, answer.name).with_ttl(answer.ttl))
        .collect()
}

pub fn map_mx(answers: Vec<MxAnswer>) -> Vec<DnsRecord> {
    answers
        .into_iter()
        .map(|answer| DnsRecord::mx(answer.exchange, answer.preference, answer.ttl))
        .collect()
}

/// One record per TXT answer, its character-strings joined.
pub fn map_txt(answers: Vec<TxtAnswer>) -> Vec<DnsRecord> {
    answers
        .into_iter()
        .map(|answer| {
            DnsRecord::new(RecordType::TXT, answer.segments.concat()).with_ttl(answer.ttl)
        })
        .collect()
}

pub fn map_srv(answers: Vec<SrvAnswer>) -> Vec<DnsRecord> {
    answers
        .into_iter()
        .map(|answer| {
            DnsRecord::srv(
                answer.target,
                answer.priority,
                answer.weight,
                answer.port,
                answer.ttl,
            )
        })
        .collect()
}

/// A single record whose value is the JSON object of the SOA fields.
pub fn map_soa(answer: SoaAnswer) -> Vec<DnsRecord> {
    let value = json!({
        "nsname": answer.mname,
        "hostmaster": answer.rname,
        "serial": answer.serial,
        "refresh": answer.refresh,
        "retry": answer.retry,
        "expire": answer.expire,
        "minttl": answer.minimum,
    });
    vec![DnsRecord::new(RecordType::SOA, value.to_string()).with_ttl(answer.ttl)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv6_is_canonical() {
        let records = map_addresses(
            RecordType::AAAA,
            vec![AddressAnswer {
                address: "2001:0db8:0000:0000:0000:0000:0000:0001".parse().unwrap(),
                ttl: Some(60),
            }],
        );
        assert_eq!(records[0].value, "2001:db8::1");
        assert_eq!(records[0].ttl, Some(60));
    }

    #[test]
    fn test_txt_segments_are_joined() {
        let records = map_txt(vec![TxtAnswer {
            segments: vec!["v=spf1 ".to_string(), "-all".to_string()],
            ttl: None,
        }]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, "v=spf1 -all");
    }

    #[test]
    fn test_soa_value_is_json() {
        let records = map_soa(SoaAnswer {
            mname: "ns1.example.com".to_string(),
            rname: "hostmaster.example.com".to_string(),
            serial: 2024010101,
            refresh: 7200,
            retry: 3600,
            expire: 1209600,
            minimum: 300,
            ttl: Some(3600),
        });
        assert_eq!(records.len(), 1);

        let value: serde_json::Value = serde_json::from_str(&records[0].value).unwrap();
        assert_eq!(value["nsname"], "ns1.example.com");
        assert_eq!(value["hostmaster"], "hostmaster.example.com");
        assert_eq!(value["serial"], 2024010101u32);
        assert_eq!(value["minttl"], 300);
    }

    #[test]
    fn test_mx_and_srv_carry_fields() {
        let mx = map_mx(vec![MxAnswer {
            exchange: "mail.example.com".to_string(),
            preference: 10,
            ttl: None,
        }]);
        assert_eq!(mx[0].priority, Some(10));
        assert_eq!(mx[0].exchange.as_deref(), Some("mail.example.com"));

        let srv = map_srv(vec![SrvAnswer {
            target: "sip.example.com".to_string(),
            priority: 1,
            weight: 5,
            port: 5060,
            ttl: None,
        }]);
        assert_eq!(srv[0].port, Some(5060));
        assert_eq!(srv[0].target.as_deref(), Some("sip.example.com"));
    }
}
