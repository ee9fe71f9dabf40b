use arpscope_domain::Host;
use std::sync::Arc;

use crate::services::HostCache;

/// Point-in-time view of the host table for rendering.
#[derive(Debug, Clone)]
pub struct HostTable {
    pub size: usize,
    pub hosts: Vec<(String, Host)>,
    pub event_count: usize,
}

pub struct GetHostsUseCase {
    cache: Arc<HostCache>,
}

impl GetHostsUseCase {
    pub fn new(cache: Arc<HostCache>) -> Self {
        Self { cache }
    }

    pub fn execute(&self) -> HostTable {
        let hosts = self.cache.snapshot();
        HostTable {
            size: hosts.len(),
            hosts,
            event_count: self.cache.event_count(),
        }
    }
}
