//! Ferrous Resolve Infrastructure Layer
//!
//! Adapters behind the application ports: the `hickory-proto` wire provider,
//! the sharded response cache, the layered resolver, metrics sinks, and the
//! [`DnsClient`](dns::DnsClient) facade that wires them together.
pub mod dns;
