#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, SOA, TXT};
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// Answers served by [`MockDnsServer`].
#[derive(Default, Clone)]
pub struct MockZone {
    records: Vec<Record>,
    nxdomain: HashSet<String>,
    servfail: HashSet<String>,
    truncate_udp: bool,
}

impl MockZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(mut self, record: Record) -> Self {
        self.records.push(record);
        self
    }

    pub fn nxdomain(mut self, domain: &str) -> Self {
        self.nxdomain.insert(domain.to_string());
        self
    }

    pub fn servfail(mut self, domain: &str) -> Self {
        self.servfail.insert(domain.to_string());
        self
    }

    /// UDP replies carry only the TC bit; TCP carries the answers.
    pub fn truncate_udp(mut self) -> Self {
        self.truncate_udp = true;
        self
    }
}

fn name(domain: &str) -> Name {
    Name::from_str(&format!("{}.", domain)).unwrap()
}

pub fn a_record(domain: &str, ip: &str) -> Record {
    Record::from_rdata(name(domain), 300, RData::A(A(ip.parse().unwrap())))
}

pub fn aaaa_record(domain: &str, ip: &str) -> Record {
    Record::from_rdata(name(domain), 300, RData::AAAA(AAAA(ip.parse().unwrap())))
}

pub fn cname_record(domain: &str, target: &str) -> Record {
    Record::from_rdata(name(domain), 300, RData::CNAME(CNAME(name(target))))
}

pub fn mx_record(domain: &str, preference: u16, exchange: &str) -> Record {
    Record::from_rdata(
        name(domain),
        300,
        RData::MX(MX::new(preference, name(exchange))),
    )
}

pub fn txt_record(domain: &str, segments: &[&str]) -> Record {
    let segments = segments.iter().map(|s| s.to_string()).collect();
    Record::from_rdata(name(domain), 300, RData::TXT(TXT::new(segments)))
}

pub fn soa_record(domain: &str) -> Record {
    let soa = SOA::new(
        name(&format!("ns1.{}", domain)),
        name(&format!("hostmaster.{}", domain)),
        2024010101,
        7200,
        3600,
        1209600,
        300,
    );
    Record::from_rdata(name(domain), 3600, RData::SOA(soa))
}

/// Localhost DNS server answering over UDP and TCP on one port.
pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(zone: MockZone) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;
        let zone = Arc::new(zone);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = build_response(&zone, &buf[..len], true) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((stream, _)) = accepted {
                            tokio::spawn(serve_tcp(stream, Arc::clone(&zone)));
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn serve_tcp(mut stream: tokio::net::TcpStream, zone: Arc<MockZone>) {
    let mut len_buf = [0u8; 2];
    if stream.read_exact(&mut len_buf).await.is_err() {
        return;
    }
    let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    if stream.read_exact(&mut query).await.is_err() {
        return;
    }

    if let Some(response) = build_response(&zone, &query, false) {
        let _ = stream
            .write_all(&(response.len() as u16).to_be_bytes())
            .await;
        let _ = stream.write_all(&response).await;
        let _ = stream.flush().await;
    }
}

fn build_response(zone: &MockZone, query_bytes: &[u8], over_udp: bool) -> Option<Vec<u8>> {
    let request = Message::from_vec(query_bytes).ok()?;
    let query = request.queries().first()?.clone();
    let domain = query
        .name()
        .to_utf8()
        .trim_end_matches('.')
        .to_ascii_lowercase();

    let mut response = Message::new(request.id(), MessageType::Response, OpCode::Query);
    response.set_recursion_desired(true);
    response.set_recursion_available(true);
    response.add_query(query.clone());

    if zone.nxdomain.contains(&domain) {
        response.set_response_code(ResponseCode::NXDomain);
    } else if zone.servfail.contains(&domain) {
        response.set_response_code(ResponseCode::ServFail);
    } else if over_udp && zone.truncate_udp {
        response.set_truncated(true);
    } else {
        for record in &zone.records {
            let owner = record.name().to_utf8();
            if owner.trim_end_matches('.') == domain && record.record_type() == query.query_type()
            {
                response.add_answer(record.clone());
            }
        }
    }

    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    response.emit(&mut encoder).ok()?;
    Some(buf)
}
