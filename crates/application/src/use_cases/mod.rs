pub mod capture;
pub mod hosts;

pub use capture::{
    CaptureTarget, IngestFrameUseCase, IngestOutcome, ResolveCaptureInterfaceUseCase,
};
pub use hosts::{ExpireStaleHostsUseCase, GetHostsUseCase, HostTable};
