use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Age after which a host that has not been re-observed is expired
    #[serde(default = "default_host_ttl_secs")]
    pub host_ttl_secs: u64,

    #[serde(default = "default_expiry_interval_secs")]
    pub expiry_interval_secs: u64,

    /// Upper bound on retained events; unbounded when absent
    #[serde(default)]
    pub max_events: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            host_ttl_secs: default_host_ttl_secs(),
            expiry_interval_secs: default_expiry_interval_secs(),
            max_events: None,
        }
    }
}

fn default_host_ttl_secs() -> u64 {
    300
}

fn default_expiry_interval_secs() -> u64 {
    30
}
