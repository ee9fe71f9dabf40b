use arpscope_application::ports::{CaptureOpener, FrameSource};
use arpscope_domain::{CaptureConfig, CaptureError, CapturedFrame};
use chrono::{DateTime, Utc};
use pcap::{Active, Capture, PacketHeader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::filter::filter_expression;

/// Capture handle parameters taken from [`CaptureConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSettings {
    pub snaplen: i32,
    pub promiscuous: bool,
    pub read_timeout_ms: i32,
    pub filter: String,
}

impl CaptureSettings {
    pub fn from_config(config: &CaptureConfig) -> Self {
        Self {
            snaplen: config.snaplen,
            promiscuous: config.promiscuous,
            read_timeout_ms: config.read_timeout_ms,
            filter: filter_expression(config.capture_icmp),
        }
    }
}

/// Opens live pcap handles with the ARP filter installed.
///
/// Every source it hands out observes `shutdown` between reads, so a
/// cancelled token ends the stream within one read timeout.
pub struct PcapCaptureOpener {
    settings: CaptureSettings,
    shutdown: CancellationToken,
}

impl PcapCaptureOpener {
    pub fn new(settings: CaptureSettings, shutdown: CancellationToken) -> Self {
        Self { settings, shutdown }
    }
}

impl CaptureOpener for PcapCaptureOpener {
    type Source = PcapFrameSource;

    fn open(&self, interface: &str) -> Result<PcapFrameSource, CaptureError> {
        let open_err = |e: pcap::Error| CaptureError::Open {
            interface: interface.to_string(),
            reason: e.to_string(),
        };

        let mut capture = Capture::from_device(interface)
            .map_err(open_err)?
            .promisc(self.settings.promiscuous)
            .snaplen(self.settings.snaplen)
            .timeout(self.settings.read_timeout_ms)
            .immediate_mode(true)
            .open()
            .map_err(open_err)?;

        capture
            .filter(&self.settings.filter, true)
            .map_err(|e| CaptureError::Filter {
                expression: self.settings.filter.clone(),
                reason: e.to_string(),
            })?;

        info!(
            interface = %interface,
            filter = %self.settings.filter,
            snaplen = self.settings.snaplen,
            promiscuous = self.settings.promiscuous,
            "Live capture opened"
        );

        Ok(PcapFrameSource {
            capture,
            shutdown: self.shutdown.clone(),
        })
    }
}

pub struct PcapFrameSource {
    capture: Capture<Active>,
    shutdown: CancellationToken,
}

impl FrameSource for PcapFrameSource {
    fn next_frame(&mut self) -> Result<Option<CapturedFrame>, CaptureError> {
        loop {
            if self.shutdown.is_cancelled() {
                debug!("Capture shutdown requested");
                return Ok(None);
            }

            match self.capture.next_packet() {
                Ok(packet) => {
                    let frame = CapturedFrame::new(packet.data.to_vec());
                    return Ok(Some(match capture_time(packet.header) {
                        Some(at) => frame.with_timestamp(at),
                        None => frame,
                    }));
                }
                Err(pcap::Error::TimeoutExpired) => continue,
                Err(pcap::Error::NoMorePackets) => return Ok(None),
                Err(e) if is_interface_gone(&e) => {
                    return Err(CaptureError::InterfaceGone(e.to_string()))
                }
                Err(e) => return Err(CaptureError::Source(e.to_string())),
            }
        }
    }
}

// libpcap reports ENETDOWN and ENODEV on a live handle with these messages.
const INTERFACE_DOWN: &str = "The interface went down";
const INTERFACE_DISAPPEARED: &str = "The interface disappeared";

fn is_interface_gone(error: &pcap::Error) -> bool {
    match error {
        pcap::Error::PcapError(msg) => {
            msg.contains(INTERFACE_DOWN) || msg.contains(INTERFACE_DISAPPEARED)
        }
        _ => false,
    }
}

#[allow(clippy::unnecessary_cast)]
fn capture_time(header: &PacketHeader) -> Option<DateTime<Utc>> {
    let secs = header.ts.tv_sec as i64;
    let micros = u32::try_from(header.ts.tv_usec).ok()?;
    DateTime::from_timestamp(secs, micros.checked_mul(1_000)?)
}
