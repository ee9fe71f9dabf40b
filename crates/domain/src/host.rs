use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::net::IpAddr;
use std::sync::Arc;

use crate::errors::{ValidationError, ValidationErrors};
use crate::mac_address::MacAddress;

/// Comment attached to hosts learned from captured traffic.
pub const AUTO_CACHED_COMMENT: &str = "auto-cached";

/// A single IP to MAC binding as last observed on the wire
///
/// Hosts are never edited in place: a newer observation produces a new
/// `Host` that replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    ip: IpAddr,
    mac: MacAddress,
    timestamp: DateTime<Utc>,
    comment: Arc<str>,
}

impl Host {
    /// IPv4-mapped IPv6 addresses are stored in their IPv4 form.
    pub fn new(ip: IpAddr, mac: MacAddress, timestamp: DateTime<Utc>, comment: &str) -> Self {
        Self {
            ip: ip.to_canonical(),
            mac,
            timestamp,
            comment: Arc::from(comment),
        }
    }

    /// Validates both fields independently so callers see every problem at once.
    pub fn parse(
        ip: &str,
        mac: &str,
        comment: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let ip = match ip.trim().parse::<IpAddr>() {
            Ok(ip) => Some(ip),
            Err(_) => {
                errors.push(ValidationError::InvalidIpAddress(ip.to_string()));
                None
            }
        };

        let mac = match mac.parse::<MacAddress>() {
            Ok(mac) => Some(mac),
            Err(reason) => {
                errors.push(ValidationError::InvalidMacAddress(reason));
                None
            }
        };

        match (ip, mac) {
            (Some(ip), Some(mac)) => Ok(Self::new(ip, mac, timestamp, comment)),
            _ => Err(errors),
        }
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn mac(&self) -> MacAddress {
        self.mac
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Canonical cache key for this host.
    pub fn key(&self) -> String {
        self.ip.to_string()
    }

    pub fn is_stale(&self, since: DateTime<Utc>) -> bool {
        self.timestamp < since
    }
}

/// Numeric address ordering for cache keys: IPv4 before IPv6, then by value.
/// Unparsable keys sort last, lexically.
pub fn compare_host_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<IpAddr>(), b.parse::<IpAddr>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
