use arpscope_domain::CaptureError;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::ports::{CaptureOpener, FrameSource};
use crate::use_cases::{IngestFrameUseCase, IngestOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    InterfaceResolved,
    CaptureOpen,
    Streaming,
    Closed,
    Faulted,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Idle => "idle",
            PipelineState::InterfaceResolved => "interface-resolved",
            PipelineState::CaptureOpen => "capture-open",
            PipelineState::Streaming => "streaming",
            PipelineState::Closed => "closed",
            PipelineState::Faulted => "faulted",
        };
        f.write_str(name)
    }
}

/// Counters for one streaming run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureSummary {
    pub frames_seen: u64,
    pub arp_observed: u64,
    pub icmp_reported: u64,
    pub ignored: u64,
    pub skipped: u64,
}

impl CaptureSummary {
    fn count(&mut self, outcome: &IngestOutcome) {
        self.frames_seen += 1;
        match outcome {
            IngestOutcome::HostObserved(_) => self.arp_observed += 1,
            IngestOutcome::IcmpReported => self.icmp_reported += 1,
            IngestOutcome::Ignored => self.ignored += 1,
            IngestOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Drives one capture from interface selection to close.
///
/// `Idle -> InterfaceResolved -> CaptureOpen -> Streaming -> Closed | Faulted`.
/// A faulted pipeline never reopens its source; restarting is up to the owner.
pub struct CapturePipeline {
    ingest: Arc<IngestFrameUseCase>,
    state: PipelineState,
    interface: Option<String>,
}

impl CapturePipeline {
    pub fn new(ingest: Arc<IngestFrameUseCase>) -> Self {
        Self {
            ingest,
            state: PipelineState::Idle,
            interface: None,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }

    pub fn set_interface(&mut self, interface: impl Into<String>) {
        let interface = interface.into();
        info!(interface = %interface, "Capture interface resolved");
        self.interface = Some(interface);
        self.state = PipelineState::InterfaceResolved;
    }

    pub fn open<O: CaptureOpener>(&mut self, opener: &O) -> Result<O::Source, CaptureError> {
        let interface = match (self.state, self.interface.as_deref()) {
            (PipelineState::InterfaceResolved, Some(interface)) => interface.to_string(),
            (state, interface) => {
                self.state = PipelineState::Faulted;
                return Err(CaptureError::Open {
                    interface: interface.unwrap_or_default().to_string(),
                    reason: format!("pipeline cannot open a capture while {}", state),
                });
            }
        };

        match opener.open(&interface) {
            Ok(source) => {
                self.state = PipelineState::CaptureOpen;
                info!(interface = %interface, "Capture opened");
                Ok(source)
            }
            Err(e) => {
                self.state = PipelineState::Faulted;
                error!(interface = %interface, error = %e, "Failed to open capture");
                Err(e)
            }
        }
    }

    /// Pull frames until the source is exhausted or fails.
    ///
    /// Individual frames that cannot be decoded are counted and skipped. Losing
    /// the interface ends the stream like exhaustion does.
    pub fn stream<S: FrameSource>(&mut self, mut source: S) -> Result<CaptureSummary, CaptureError> {
        if self.state != PipelineState::CaptureOpen {
            let state = self.state;
            self.state = PipelineState::Faulted;
            return Err(CaptureError::Source(format!(
                "pipeline cannot stream while {}",
                state
            )));
        }

        self.state = PipelineState::Streaming;
        let mut summary = CaptureSummary::default();

        loop {
            match source.next_frame() {
                Ok(Some(frame)) => {
                    let outcome = self.ingest.execute(&frame);
                    summary.count(&outcome);
                }
                Ok(None) => {
                    self.state = PipelineState::Closed;
                    info!(
                        frames = summary.frames_seen,
                        arp = summary.arp_observed,
                        icmp = summary.icmp_reported,
                        skipped = summary.skipped,
                        "Capture closed"
                    );
                    return Ok(summary);
                }
                Err(CaptureError::InterfaceGone(reason)) => {
                    self.state = PipelineState::Closed;
                    warn!(
                        interface = self.interface().unwrap_or_default(),
                        reason = %reason,
                        frames = summary.frames_seen,
                        "Capture interface gone, closing"
                    );
                    return Ok(summary);
                }
                Err(e) => {
                    self.state = PipelineState::Faulted;
                    error!(error = %e, frames = summary.frames_seen, "Capture source faulted");
                    return Err(e);
                }
            }

            if summary.frames_seen % 10_000 == 0 {
                debug!(frames = summary.frames_seen, "Capture progress");
            }
        }
    }

    pub fn run<O: CaptureOpener>(&mut self, opener: &O) -> Result<CaptureSummary, CaptureError> {
        let source = self.open(opener)?;
        self.stream(source)
    }
}
