pub mod cache;
pub mod capture;
pub mod display;
pub mod errors;
pub mod logging;
pub mod root;

pub use cache::CacheConfig;
pub use capture::{CaptureConfig, TimestampSource};
pub use display::DisplayConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
