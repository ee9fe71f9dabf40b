#![allow(dead_code)]

use arpscope_application::ports::{CaptureOpener, Clock, FrameDecoder, FrameSource, RouteResolver};
use arpscope_domain::{
    ArpObservation, ArpOperation, CaptureError, CapturedFrame, DecodedFrame, EgressPath,
    FrameDecodeError, IcmpEcho, MacAddress, RouteError,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::{HashMap, VecDeque};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new() -> Self {
        Self::at(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }

    pub fn now_minus(&self, by: Duration) -> DateTime<Utc> {
        *self.now.lock().unwrap() - by
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// ============================================================================
// Frame decoding
// ============================================================================

/// Frame encoding understood by `MockFrameDecoder`:
/// `[0x01, ip0, ip1, ip2, ip3, mac0..mac5]` is an ARP reply,
/// `[0x02, ...]` an ICMP echo, `[0x03]` something ignorable,
/// anything else fails to decode.
pub fn arp_frame(ip: &str, mac: &str) -> CapturedFrame {
    let ip: Ipv4Addr = ip.parse().unwrap();
    let mac: MacAddress = mac.parse().unwrap();
    let mut data = vec![0x01];
    data.extend_from_slice(&ip.octets());
    data.extend_from_slice(mac.as_bytes());
    CapturedFrame::new(data)
}

pub fn icmp_frame() -> CapturedFrame {
    CapturedFrame::new(vec![0x02])
}

pub fn ignored_frame() -> CapturedFrame {
    CapturedFrame::new(vec![0x03])
}

pub fn garbage_frame() -> CapturedFrame {
    CapturedFrame::new(vec![0xff, 0x00])
}

pub struct MockFrameDecoder;

impl FrameDecoder for MockFrameDecoder {
    fn decode(&self, frame: &[u8]) -> Result<DecodedFrame, FrameDecodeError> {
        match frame.first() {
            Some(0x01) if frame.len() == 11 => {
                let sender_ip = Ipv4Addr::new(frame[1], frame[2], frame[3], frame[4]);
                let sender_mac = MacAddress::from_slice(&frame[5..11]).unwrap();
                Ok(DecodedFrame::Arp(ArpObservation {
                    operation: ArpOperation::Reply,
                    sender_ip,
                    sender_mac,
                    target_ip: Ipv4Addr::new(192, 168, 1, 1),
                    target_mac: MacAddress::new([0x02, 0, 0, 0, 0, 1]),
                }))
            }
            Some(0x02) => Ok(DecodedFrame::IcmpEcho(IcmpEcho {
                source: Ipv4Addr::new(192, 168, 1, 5),
                destination: Ipv4Addr::new(8, 8, 8, 8),
                icmp_type: 8,
                code: 0,
                payload: vec![1, 2, 3],
            })),
            Some(0x03) => Ok(DecodedFrame::Ignored),
            _ => Err(FrameDecodeError::Truncated {
                layer: "mock",
                len: frame.len(),
            }),
        }
    }
}

// ============================================================================
// Capture sources
// ============================================================================

pub struct MockFrameSource {
    frames: VecDeque<CapturedFrame>,
    fail_at_end: Option<CaptureError>,
    pulled: Arc<AtomicU64>,
}

impl MockFrameSource {
    pub fn new(frames: Vec<CapturedFrame>) -> Self {
        Self {
            frames: frames.into(),
            fail_at_end: None,
            pulled: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn failing_after(frames: Vec<CapturedFrame>, error: CaptureError) -> Self {
        Self {
            fail_at_end: Some(error),
            ..Self::new(frames)
        }
    }

    pub fn pulled(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.pulled)
    }
}

impl FrameSource for MockFrameSource {
    fn next_frame(&mut self) -> Result<Option<CapturedFrame>, CaptureError> {
        self.pulled.fetch_add(1, Ordering::Relaxed);
        match self.frames.pop_front() {
            Some(frame) => Ok(Some(frame)),
            None => match self.fail_at_end.take() {
                Some(error) => Err(error),
                None => Ok(None),
            },
        }
    }
}

pub struct MockCaptureOpener {
    frames: Mutex<Option<Vec<CapturedFrame>>>,
    error: Option<CaptureError>,
    opened: Mutex<Vec<String>>,
}

impl MockCaptureOpener {
    pub fn with_frames(frames: Vec<CapturedFrame>) -> Self {
        Self {
            frames: Mutex::new(Some(frames)),
            error: None,
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: CaptureError) -> Self {
        Self {
            frames: Mutex::new(None),
            error: Some(error),
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn opened_interfaces(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl CaptureOpener for MockCaptureOpener {
    type Source = MockFrameSource;

    fn open(&self, interface: &str) -> Result<Self::Source, CaptureError> {
        self.opened.lock().unwrap().push(interface.to_string());
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        let frames = self.frames.lock().unwrap().take().unwrap_or_default();
        Ok(MockFrameSource::new(frames))
    }
}

// ============================================================================
// Routing
// ============================================================================

pub struct MockRouteResolver {
    paths: HashMap<String, EgressPath>,
    calls: AtomicU64,
}

impl MockRouteResolver {
    pub fn new() -> Self {
        Self {
            paths: HashMap::new(),
            calls: AtomicU64::new(0),
        }
    }

    pub fn with_path(mut self, target: &str, interface: &str, local_addr: &str) -> Self {
        self.paths.insert(
            target.to_string(),
            EgressPath {
                interface_name: interface.to_string(),
                local_addr: local_addr.parse::<IpAddr>().unwrap(),
            },
        );
        self
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RouteResolver for MockRouteResolver {
    async fn resolve(&self, target: &str) -> Result<EgressPath, RouteError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.paths.get(target).cloned().ok_or_else(|| RouteError::Connect {
            target: target.to_string(),
            reason: "network unreachable".to_string(),
        })
    }
}
