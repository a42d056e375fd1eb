pub mod builder;
pub mod cache_layer;
pub mod classify;
pub mod config;
pub mod core;
pub mod record_mapper;

pub use builder::ResolverBuilder;
pub use cache_layer::CachedResolver;
pub use config::ResolverConfig;
pub use core::CoreResolver;
