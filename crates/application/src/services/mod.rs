pub mod capture_pipeline;
pub mod event_log;
pub mod host_cache;

pub use capture_pipeline::{CapturePipeline, CaptureSummary, PipelineState};
pub use event_log::EventLog;
pub use host_cache::HostCache;
