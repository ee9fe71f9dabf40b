//! arpscope Domain Layer
pub mod config;
pub mod errors;
pub mod event;
pub mod frame;
pub mod host;
pub mod mac_address;
pub mod route;

pub use config::{
    CacheConfig, CaptureConfig, CliOverrides, Config, ConfigError, DisplayConfig, LoggingConfig,
    TimestampSource,
};
pub use errors::{CaptureError, FrameDecodeError, RouteError, ValidationError, ValidationErrors};
pub use event::{Event, EventKind};
pub use frame::{ArpObservation, ArpOperation, CapturedFrame, DecodedFrame, IcmpEcho};
pub use host::{compare_host_keys, Host, AUTO_CACHED_COMMENT};
pub use mac_address::MacAddress;
pub use route::{representative_address, EgressPath, LocalInterface, Route};
