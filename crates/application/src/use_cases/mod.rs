pub mod batch;
pub mod cname;
pub mod records;

// Re-export use cases
pub use batch::{BatchOptions, BatchResolveUseCase, RetryPolicy};
pub use cname::{health_score, validate, CnameTracer, TraceOptions};
pub use records::ResolveAllRecordsUseCase;
