mod diagnostics;
mod trace_chain;

pub use diagnostics::{health_score, validate};
pub use trace_chain::{CnameTracer, TraceOptions};
