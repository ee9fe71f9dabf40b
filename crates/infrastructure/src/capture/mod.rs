pub mod decoder;
pub mod filter;
pub mod pcap_source;

pub use decoder::PnetFrameDecoder;
pub use filter::{filter_expression, ARP_FILTER};
pub use pcap_source::{CaptureSettings, PcapCaptureOpener, PcapFrameSource};
