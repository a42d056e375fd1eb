#![allow(dead_code)]
use async_trait::async_trait;
use ferrous_resolve_application::ports::{
    AddressAnswer, LookupTarget, MetricsSink, MxAnswer, NameAnswer, NameResolutionProvider,
    ProviderError, ResolutionEvent, SoaAnswer, TxtAnswer,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Canned answer for one (domain, operation) pair.
#[derive(Clone)]
pub enum Canned {
    Addresses(Vec<&'static str>),
    Names(Vec<&'static str>),
    Mx(Vec<(&'static str, u16)>),
    Txt(Vec<Vec<&'static str>>),
    Soa,
    Fail(ProviderError),
    Delayed(u64, Box<Canned>),
}

/// In-memory provider answering from a table and counting calls.
#[derive(Default)]
pub struct StubProvider {
    answers: HashMap<(String, &'static str), Canned>,
    calls: AtomicUsize,
    servers_seen: Mutex<Vec<Option<String>>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, domain: &str, operation: &'static str, canned: Canned) -> Self {
        self.answers.insert((domain.to_string(), operation), canned);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn servers_seen(&self) -> Vec<Option<String>> {
        self.servers_seen.lock().unwrap().clone()
    }

    async fn answer(
        &self,
        target: &LookupTarget<'_>,
        operation: &'static str,
    ) -> Result<Canned, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.servers_seen
            .lock()
            .unwrap()
            .push(target.server.map(str::to_string));

        let mut canned = self
            .answers
            .get(&(target.domain.to_string(), operation))
            .cloned()
            .ok_or_else(|| ProviderError::not_found(target.domain))?;

        while let Canned::Delayed(ms, inner) = canned {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            canned = *inner;
        }

        match canned {
            Canned::Fail(e) => Err(e),
            other => Ok(other),
        }
    }
}

fn addresses(canned: Canned) -> Vec<AddressAnswer> {
    match canned {
        Canned::Addresses(list) => list
            .into_iter()
            .map(|ip| AddressAnswer {
                address: ip.parse().unwrap(),
                ttl: Some(300),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn names(canned: Canned) -> Vec<NameAnswer> {
    match canned {
        Canned::Names(list) => list
            .into_iter()
            .map(|name| NameAnswer {
                name: name.to_string(),
                ttl: Some(300),
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[async_trait]
impl NameResolutionProvider for StubProvider {
    async fn resolve_a(
        &self,
        target: &LookupTarget<'_>,
    ) -> Result<Vec<AddressAnswer>, ProviderError> {
        self.answer(target, "a").await.map(addresses)
    }

    async fn resolve_aaaa(
        &self,
        target: &LookupTarget<'_>,
    ) -> Result<Vec<AddressAnswer>, ProviderError> {
        self.answer(target, "aaaa").await.map(addresses)
    }

    async fn resolve_cname(
        &self,
        target: &LookupTarget<'_>,
    ) -> Result<Vec<NameAnswer>, ProviderError> {
        self.answer(target, "cname").await.map(names)
    }

    async fn resolve_mx(&self, target: &LookupTarget<'_>) -> Result<Vec<MxAnswer>, ProviderError> {
        match self.answer(target, "mx").await? {
            Canned::Mx(list) => Ok(list
                .into_iter()
                .map(|(exchange, preference)| MxAnswer {
                    exchange: exchange.to_string(),
                    preference,
                    ttl: Some(300),
                })
                .collect()),
            _ => Ok(Vec::new()),
        }
    }

    async fn resolve_txt(
        &self,
        target: &LookupTarget<'_>,
    ) -> Result<Vec<TxtAnswer>, ProviderError> {
        match self.answer(target, "txt").await? {
            Canned::Txt(list) => Ok(list
                .into_iter()
                .map(|segments| TxtAnswer {
                    segments: segments.into_iter().map(str::to_string).collect(),
                    ttl: Some(300),
                })
                .collect()),
            _ => Ok(Vec::new()),
        }
    }

    async fn resolve_ns(
        &self,
        target: &LookupTarget<'_>,
    ) -> Result<Vec<NameAnswer>, ProviderError> {
        self.answer(target, "ns").await.map(names)
    }

    async fn resolve_soa(&self, target: &LookupTarget<'_>) -> Result<SoaAnswer, ProviderError> {
        self.answer(target, "soa").await?;
        Ok(SoaAnswer {
            mname: "ns1.example.com".to_string(),
            rname: "hostmaster.example.com".to_string(),
            serial: 2024010101,
            refresh: 7200,
            retry: 3600,
            expire: 1209600,
            minimum: 300,
            ttl: Some(3600),
        })
    }
}

/// Sink keeping every signal for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    pub cache_lookups: Mutex<Vec<bool>>,
    pub resolutions: Mutex<Vec<ResolutionEvent>>,
    pub errors: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub fn hits(&self) -> usize {
        self.cache_lookups.lock().unwrap().iter().filter(|hit| **hit).count()
    }

    pub fn misses(&self) -> usize {
        self.cache_lookups.lock().unwrap().iter().filter(|hit| !**hit).count()
    }

    pub fn resolutions(&self) -> Vec<ResolutionEvent> {
        self.resolutions.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<(String, String)> {
        self.errors.lock().unwrap().clone()
    }
}

impl MetricsSink for RecordingSink {
    fn record_cache_hit(&self, hit: bool, _source: &str) {
        self.cache_lookups.lock().unwrap().push(hit);
    }

    fn record_dns_resolution(&self, event: &ResolutionEvent) {
        self.resolutions.lock().unwrap().push(event.clone());
    }

    fn record_error(&self, error: &str, context: &str) {
        self.errors
            .lock()
            .unwrap()
            .push((error.to_string(), context.to_string()));
    }
}
