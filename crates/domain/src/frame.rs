use chrono::{DateTime, Utc};
use std::net::Ipv4Addr;

use crate::mac_address::MacAddress;

/// Raw link-layer frame as delivered by a capture source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    pub data: Vec<u8>,
    /// Arrival time reported by the capture source, if any
    pub captured_at: Option<DateTime<Utc>>,
}

impl CapturedFrame {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            captured_at: None,
        }
    }

    pub fn with_timestamp(mut self, captured_at: DateTime<Utc>) -> Self {
        self.captured_at = Some(captured_at);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArpOperation {
    Request,
    Reply,
    Other(u16),
}

impl From<u16> for ArpOperation {
    fn from(op: u16) -> Self {
        match op {
            1 => ArpOperation::Request,
            2 => ArpOperation::Reply,
            other => ArpOperation::Other(other),
        }
    }
}

/// Sender/target bindings carried by an Ethernet/IPv4 ARP frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpObservation {
    pub operation: ArpOperation,
    pub sender_ip: Ipv4Addr,
    pub sender_mac: MacAddress,
    pub target_ip: Ipv4Addr,
    pub target_mac: MacAddress,
}

impl ArpObservation {
    /// A sender binding worth caching: RFC 5227 probes carry 0.0.0.0 and
    /// some stacks leave the hardware address zeroed.
    pub fn has_usable_sender(&self) -> bool {
        !self.sender_ip.is_unspecified() && !self.sender_mac.is_zero()
    }
}

/// ICMP echo request or reply, reported for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcmpEcho {
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
    pub icmp_type: u8,
    pub code: u8,
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedFrame {
    Arp(ArpObservation),
    IcmpEcho(IcmpEcho),
    Ignored,
}
