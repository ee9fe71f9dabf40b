pub mod expire_stale_hosts;
pub mod get_hosts;

pub use expire_stale_hosts::ExpireStaleHostsUseCase;
pub use get_hosts::{GetHostsUseCase, HostTable};
