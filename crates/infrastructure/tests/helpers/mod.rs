pub mod dns_server_mock;
pub mod providers;

pub use dns_server_mock::*;
pub use providers::*;
