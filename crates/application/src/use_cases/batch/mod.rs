mod options;
mod resolve_batch;
mod retry;
mod strategy;

pub use options::{BatchOptions, RetryPolicy};
pub use resolve_batch::BatchResolveUseCase;
pub use retry::resolve_with_retry;
pub use strategy::{BatchContext, BatchError, BatchStrategy, BoundedStrategy, UnconstrainedStrategy};
