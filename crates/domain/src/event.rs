use chrono::{DateTime, Utc};
use std::net::IpAddr;

use crate::mac_address::MacAddress;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    MacChanged {
        ip: IpAddr,
        old: MacAddress,
        new: MacAddress,
    },
    Expired {
        key: String,
    },
}

/// A notable host cache transition. Events are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl Event {
    pub fn mac_changed(
        ip: IpAddr,
        old: MacAddress,
        new: MacAddress,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            description: format!("Host {} MAC changed from {} to {}", ip, old, new),
            kind: EventKind::MacChanged { ip, old, new },
            timestamp,
        }
    }

    pub fn expired(key: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            description: format!("Host {} has expired", key),
            kind: EventKind::Expired {
                key: key.to_string(),
            },
            timestamp,
        }
    }

    pub fn is_mac_change(&self) -> bool {
        matches!(self.kind, EventKind::MacChanged { .. })
    }
}
