use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use crate::services::HostCache;

/// Use case: Expire hosts that have not been re-observed within the TTL
/// Should be run periodically (e.g., every 30 seconds)
pub struct ExpireStaleHostsUseCase {
    cache: Arc<HostCache>,
    host_ttl: Duration,
}

impl ExpireStaleHostsUseCase {
    pub fn new(cache: Arc<HostCache>, host_ttl_secs: u64) -> Self {
        Self {
            cache,
            host_ttl: i64::try_from(host_ttl_secs)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or(Duration::MAX),
        }
    }

    pub fn execute(&self) -> usize {
        let since = self
            .cache
            .now()
            .checked_sub_signed(self.host_ttl)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let expired = self.cache.expire_hosts(since);

        if expired > 0 {
            info!(expired, remaining = self.cache.len(), "Stale hosts expired");
        } else {
            debug!(remaining = self.cache.len(), "No stale hosts");
        }
        expired
    }
}
