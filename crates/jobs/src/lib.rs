pub mod capture;
pub mod host_expiry;
pub mod runner;

pub use capture::CaptureJob;
pub use host_expiry::HostExpiryJob;
pub use runner::JobRunner;
