use arpscope_domain::{CaptureError, CapturedFrame};

/// Blocking pull of captured frames.
///
/// `Ok(None)` means the source is exhausted or was shut down; any `Err` is
/// unrecoverable for this source.
pub trait FrameSource: Send {
    fn next_frame(&mut self) -> Result<Option<CapturedFrame>, CaptureError>;
}

/// Opens a filtered live capture on a named interface.
pub trait CaptureOpener: Send + Sync {
    type Source: FrameSource;

    fn open(&self, interface: &str) -> Result<Self::Source, CaptureError>;
}
