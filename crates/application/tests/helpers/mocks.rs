#![allow(dead_code)]
use async_trait::async_trait;
use ferrous_resolve_application::ports::{
    DnsResolver, LookupTarget, NameAnswer, NameResolutionProvider, ProviderError,
    ProviderErrorKind,
};
use ferrous_resolve_domain::{
    DnsQuery, DnsRecord, DnsResponse, DomainError, RecordType, ResolutionErrorKind,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

const DEFAULT_ADDRESS: &str = "192.0.2.1";

#[derive(Clone)]
pub enum Behavior {
    Records(Vec<String>),
    Failure(ResolutionErrorKind, &'static str),
    Delayed(Duration, Box<Behavior>),
    /// Fails with `ServerFailure` for the first `n` calls, then answers.
    FlakyThenRecords(usize, Vec<String>),
    Unsupported,
    Panic,
    PanicOnce,
}

impl Behavior {
    pub fn records(addresses: &[&str]) -> Self {
        Behavior::Records(addresses.iter().map(|a| a.to_string()).collect())
    }

    pub fn delayed(ms: u64, inner: Behavior) -> Self {
        Behavior::Delayed(Duration::from_millis(ms), Box::new(inner))
    }
}

/// Scriptable resolver; unscripted domains answer with one A record.
pub struct MockDnsResolver {
    behaviors: RwLock<HashMap<String, Behavior>>,
    calls: Mutex<HashMap<String, usize>>,
    total_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            behaviors: RwLock::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
            total_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with(self, domain: &str, behavior: Behavior) -> Self {
        self.behaviors
            .write()
            .unwrap()
            .insert(domain.to_string(), behavior);
        self
    }

    pub fn calls_for(&self, domain: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(domain)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn record_call(&self, domain: &str) -> usize {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        let mut calls = self.calls.lock().unwrap();
        let count = calls.entry(domain.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    async fn play(
        &self,
        behavior: Behavior,
        query: &DnsQuery,
        call: usize,
    ) -> Result<DnsResponse, DomainError> {
        let mut behavior = behavior;
        loop {
            match behavior {
                Behavior::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    behavior = *inner;
                }
                Behavior::Records(addresses) => return Ok(answer(query, &addresses)),
                Behavior::Failure(kind, message) => {
                    return Ok(DnsResponse::failure(query.clone(), kind, message, 1))
                }
                Behavior::FlakyThenRecords(failures, addresses) => {
                    if call <= failures {
                        return Ok(DnsResponse::failure(
                            query.clone(),
                            ResolutionErrorKind::ServerFailure,
                            "server failure",
                            1,
                        ));
                    }
                    return Ok(answer(query, &addresses));
                }
                Behavior::Unsupported => {
                    return Err(DomainError::UnsupportedRecordType(
                        query.record_type.to_string(),
                    ))
                }
                Behavior::Panic => panic!("mock resolver panic for {}", query.domain),
                Behavior::PanicOnce => {
                    if call == 1 {
                        panic!("mock resolver panic for {}", query.domain);
                    }
                    return Ok(answer(query, &[DEFAULT_ADDRESS.to_string()]));
                }
            }
        }
    }
}

fn answer(query: &DnsQuery, addresses: &[String]) -> DnsResponse {
    let records = addresses
        .iter()
        .map(|a| DnsRecord::new(query.record_type, a.as_str()).with_ttl(Some(300)))
        .collect();
    DnsResponse::success(query.clone(), records, 1)
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResponse, DomainError> {
        let call = self.record_call(&query.domain);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlightGuard(&self.in_flight);

        let behavior = self
            .behaviors
            .read()
            .unwrap()
            .get(query.domain.as_ref())
            .cloned()
            .unwrap_or_else(|| Behavior::records(&[DEFAULT_ADDRESS]));

        self.play(behavior, query, call).await
    }
}

pub fn queries(domains: &[&str]) -> Vec<DnsQuery> {
    domains
        .iter()
        .map(|d| DnsQuery::new(d, RecordType::A))
        .collect()
}

#[derive(Clone)]
pub enum Hop {
    Alias(String),
    Missing,
    Fail(ProviderErrorKind),
    Hang,
    Panic,
}

/// Provider answering only CNAME lookups, from a fixed hop table.
/// Unknown names are NXDOMAIN.
pub struct StubCnameProvider {
    hops: HashMap<String, Hop>,
    calls: AtomicUsize,
}

impl StubCnameProvider {
    pub fn new() -> Self {
        Self {
            hops: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn alias(mut self, from: &str, to: &str) -> Self {
        self.hops.insert(from.to_string(), Hop::Alias(to.to_string()));
        self
    }

    pub fn hop(mut self, from: &str, hop: Hop) -> Self {
        self.hops.insert(from.to_string(), hop);
        self
    }

    /// `d0 -> d1 -> ... -> d{len}` ending in a name without aliases.
    pub fn linear(len: usize) -> Self {
        let mut provider = Self::new();
        for i in 0..len {
            provider = provider.alias(&format!("d{}.example", i), &format!("d{}.example", i + 1));
        }
        provider
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NameResolutionProvider for StubCnameProvider {
    async fn resolve_cname(
        &self,
        target: &LookupTarget<'_>,
    ) -> Result<Vec<NameAnswer>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.hops.get(target.domain).cloned() {
            None | Some(Hop::Missing) => Err(ProviderError::not_found(target.domain)),
            Some(Hop::Alias(name)) => Ok(vec![NameAnswer {
                name,
                ttl: Some(60),
            }]),
            Some(Hop::Fail(kind)) => Err(ProviderError::new(kind, "upstream exploded")),
            Some(Hop::Hang) => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Err(ProviderError::timeout("never reached"))
            }
            Some(Hop::Panic) => panic!("stub provider panic for {}", target.domain),
        }
    }
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
