use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};

/// Where a host's observation timestamp comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimestampSource {
    /// Wall clock at the moment the frame is processed
    #[default]
    Wall,
    /// Arrival time stamped by the capture source
    Capture,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaptureConfig {
    /// Interface override; the route resolver picks one when absent
    #[serde(default)]
    pub interface: Option<String>,

    #[serde(default)]
    pub target_cidrs: Vec<IpNetwork>,

    /// Address probed for the egress interface when no CIDR is configured
    #[serde(default = "default_route_probe_target")]
    pub route_probe_target: String,

    #[serde(default = "default_route_timeout_ms")]
    pub route_timeout_ms: u64,

    #[serde(default = "default_snaplen")]
    pub snaplen: i32,

    #[serde(default = "default_true")]
    pub promiscuous: bool,

    /// How often a blocked read wakes up to notice shutdown
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: i32,

    /// Also capture ICMP for diagnostics
    #[serde(default)]
    pub capture_icmp: bool,

    #[serde(default)]
    pub timestamp_source: TimestampSource,

    #[serde(default = "default_arp_timeout_ms")]
    pub arp_timeout_ms: u64,

    #[serde(default = "default_icmp_timeout_ms")]
    pub icmp_timeout_ms: u64,

    #[serde(default = "default_icmp_max_ttl")]
    pub icmp_max_ttl: u8,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            interface: None,
            target_cidrs: Vec::new(),
            route_probe_target: default_route_probe_target(),
            route_timeout_ms: default_route_timeout_ms(),
            snaplen: default_snaplen(),
            promiscuous: true,
            read_timeout_ms: default_read_timeout_ms(),
            capture_icmp: false,
            timestamp_source: TimestampSource::default(),
            arp_timeout_ms: default_arp_timeout_ms(),
            icmp_timeout_ms: default_icmp_timeout_ms(),
            icmp_max_ttl: default_icmp_max_ttl(),
        }
    }
}

fn default_route_probe_target() -> String {
    "1.1.1.1".to_string()
}

fn default_route_timeout_ms() -> u64 {
    2000
}

fn default_snaplen() -> i32 {
    1600
}

fn default_true() -> bool {
    true
}

fn default_read_timeout_ms() -> i32 {
    500
}

fn default_arp_timeout_ms() -> u64 {
    2000
}

fn default_icmp_timeout_ms() -> u64 {
    2000
}

fn default_icmp_max_ttl() -> u8 {
    64
}
