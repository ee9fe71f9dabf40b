pub mod ingest_frame;
pub mod resolve_interface;

pub use ingest_frame::{IngestFrameUseCase, IngestOutcome};
pub use resolve_interface::{CaptureTarget, ResolveCaptureInterfaceUseCase};
