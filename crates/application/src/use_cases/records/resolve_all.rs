use crate::use_cases::batch::{BatchOptions, BatchResolveUseCase};
use ferrous_resolve_domain::{normalize_domain, DnsQuery, DnsResponse, RecordType};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Resolves every (domain, type) pair of a cross product in one batch and
/// regroups the responses per domain.
pub struct ResolveAllRecordsUseCase {
    batch: Arc<BatchResolveUseCase>,
}

impl ResolveAllRecordsUseCase {
    pub fn new(batch: Arc<BatchResolveUseCase>) -> Self {
        Self { batch }
    }

    /// An empty `record_types` falls back to [`RecordType::COMMON`]. Each
    /// domain's responses follow the order of `record_types`.
    pub async fn execute(
        &self,
        domains: &[String],
        record_types: &[RecordType],
        options: &BatchOptions,
    ) -> BTreeMap<String, Vec<DnsResponse>> {
        let record_types: &[RecordType] = if record_types.is_empty() {
            &RecordType::COMMON
        } else {
            record_types
        };

        let mut grouped: BTreeMap<String, Vec<DnsResponse>> = BTreeMap::new();
        let mut queries = Vec::with_capacity(domains.len() * record_types.len());
        for domain in domains {
            let domain = normalize_domain(domain);
            if grouped.contains_key(&domain) {
                continue;
            }
            for record_type in record_types {
                queries.push(DnsQuery::new(&domain, *record_type));
            }
            grouped.insert(domain, Vec::with_capacity(record_types.len()));
        }

        for response in self.batch.execute(queries, options).await {
            if let Some(bucket) = grouped.get_mut(response.query.domain.as_ref()) {
                bucket.push(response);
            }
        }

        grouped
    }
}
