#![allow(dead_code)]

use arpscope_application::ports::{CaptureOpener, Clock, FrameDecoder, FrameSource};
use arpscope_domain::{
    ArpObservation, ArpOperation, CaptureError, CapturedFrame, DecodedFrame, FrameDecodeError,
    MacAddress,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::net::Ipv4Addr;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Decodes `[ip0, ip1, ip2, ip3]` as an ARP reply from that address.
pub struct Ipv4SenderDecoder;

impl FrameDecoder for Ipv4SenderDecoder {
    fn decode(&self, frame: &[u8]) -> Result<DecodedFrame, FrameDecodeError> {
        match frame {
            [a, b, c, d] => Ok(DecodedFrame::Arp(ArpObservation {
                operation: ArpOperation::Reply,
                sender_ip: Ipv4Addr::new(*a, *b, *c, *d),
                sender_mac: MacAddress::new([0x02, 0, *a, *b, *c, *d]),
                target_ip: Ipv4Addr::new(192, 168, 1, 1),
                target_mac: MacAddress::new([0x02, 0, 0, 0, 0, 1]),
            })),
            _ => Err(FrameDecodeError::Truncated {
                layer: "mock",
                len: frame.len(),
            }),
        }
    }
}

pub fn sender_frame(ip: [u8; 4]) -> CapturedFrame {
    CapturedFrame::new(ip.to_vec())
}

/// Replays its frames, then idles until the token is cancelled.
pub struct TokenSource {
    frames: Vec<CapturedFrame>,
    shutdown: CancellationToken,
}

impl FrameSource for TokenSource {
    fn next_frame(&mut self) -> Result<Option<CapturedFrame>, CaptureError> {
        if let Some(frame) = self.frames.pop() {
            return Ok(Some(frame));
        }
        while !self.shutdown.is_cancelled() {
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        Ok(None)
    }
}

pub struct TokenOpener {
    frames: Mutex<Vec<CapturedFrame>>,
    shutdown: CancellationToken,
    fail: bool,
}

impl TokenOpener {
    pub fn new(frames: Vec<CapturedFrame>, shutdown: CancellationToken) -> Self {
        Self {
            frames: Mutex::new(frames),
            shutdown,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            frames: Mutex::new(Vec::new()),
            shutdown: CancellationToken::new(),
            fail: true,
        }
    }
}

impl CaptureOpener for TokenOpener {
    type Source = TokenSource;

    fn open(&self, interface: &str) -> Result<TokenSource, CaptureError> {
        if self.fail {
            return Err(CaptureError::Open {
                interface: interface.to_string(),
                reason: "permission denied".to_string(),
            });
        }
        let mut frames = std::mem::take(&mut *self.frames.lock().unwrap());
        frames.reverse();
        Ok(TokenSource {
            frames,
            shutdown: self.shutdown.clone(),
        })
    }
}
