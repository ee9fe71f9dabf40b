use arpscope_domain::{CapturedFrame, DecodedFrame, TimestampSource, AUTO_CACHED_COMMENT};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, info};

use crate::ports::FrameDecoder;
use crate::services::HostCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// An ARP sender binding was written to the cache
    HostObserved(IpAddr),
    IcmpReported,
    Ignored,
    /// Malformed or unusable frame, treated as no observation
    Skipped,
}

/// Use case: Decode one captured frame and feed ARP sender bindings into
/// the host cache
pub struct IngestFrameUseCase {
    decoder: Arc<dyn FrameDecoder>,
    cache: Arc<HostCache>,
    timestamp_source: TimestampSource,
}

impl IngestFrameUseCase {
    pub fn new(decoder: Arc<dyn FrameDecoder>, cache: Arc<HostCache>) -> Self {
        Self {
            decoder,
            cache,
            timestamp_source: TimestampSource::Wall,
        }
    }

    pub fn with_timestamp_source(mut self, source: TimestampSource) -> Self {
        self.timestamp_source = source;
        self
    }

    pub fn execute(&self, frame: &CapturedFrame) -> IngestOutcome {
        let decoded = match self.decoder.decode(&frame.data) {
            Ok(decoded) => decoded,
            Err(e) => {
                debug!(error = %e, len = frame.data.len(), "Skipping undecodable frame");
                return IngestOutcome::Skipped;
            }
        };

        match decoded {
            DecodedFrame::Arp(arp) => {
                debug!(
                    operation = ?arp.operation,
                    sender_ip = %arp.sender_ip,
                    sender_mac = %arp.sender_mac,
                    target_ip = %arp.target_ip,
                    target_mac = %arp.target_mac,
                    "ARP frame"
                );

                if !arp.has_usable_sender() {
                    debug!(sender_ip = %arp.sender_ip, "ARP frame without usable sender binding");
                    return IngestOutcome::Skipped;
                }

                let ip = IpAddr::V4(arp.sender_ip);
                match (self.timestamp_source, frame.captured_at) {
                    (TimestampSource::Capture, Some(at)) => {
                        self.cache
                            .add_observation_at(ip, arp.sender_mac, AUTO_CACHED_COMMENT, at)
                    }
                    _ => self
                        .cache
                        .add_observation(ip, arp.sender_mac, AUTO_CACHED_COMMENT),
                }
                IngestOutcome::HostObserved(ip)
            }
            DecodedFrame::IcmpEcho(icmp) => {
                info!(
                    source = %icmp.source,
                    destination = %icmp.destination,
                    icmp_type = icmp.icmp_type,
                    code = icmp.code,
                    payload_len = icmp.payload.len(),
                    payload = ?icmp.payload,
                    "ICMP echo"
                );
                IngestOutcome::IcmpReported
            }
            DecodedFrame::Ignored => IngestOutcome::Ignored,
        }
    }
}
