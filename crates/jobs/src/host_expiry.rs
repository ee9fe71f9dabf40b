use arpscope_application::use_cases::ExpireStaleHostsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

const DEFAULT_EXPIRY_INTERVAL_SECS: u64 = 30;

/// Periodically drops hosts that have not been re-observed within the TTL.
pub struct HostExpiryJob {
    expire_stale_hosts: Arc<ExpireStaleHostsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl HostExpiryJob {
    pub fn new(expire_stale_hosts: Arc<ExpireStaleHostsUseCase>) -> Self {
        Self {
            expire_stale_hosts,
            interval_secs: DEFAULT_EXPIRY_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    /// Sweep period in seconds, never shorter than one.
    pub fn with_interval(mut self, secs: u64) -> Self {
        self.interval_secs = secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            "Starting host expiry background job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            // The first tick completes immediately; nothing can be stale yet.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("HostExpiryJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        self.expire_stale_hosts.execute();
                    }
                }
            }
        });
    }
}
