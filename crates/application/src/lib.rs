//! Ferrous Resolve Application Layer
//!
//! Ports the engine depends on and the use cases built on top of them:
//! concurrent batch resolution, CNAME chain tracing and chain diagnostics.

pub mod ports;
pub mod use_cases;
