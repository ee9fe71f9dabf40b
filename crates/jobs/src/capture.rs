use arpscope_application::ports::CaptureOpener;
use arpscope_application::services::{CapturePipeline, CaptureSummary};
use arpscope_application::use_cases::IngestFrameUseCase;
use arpscope_domain::CaptureError;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Runs one capture pipeline on a blocking thread.
///
/// Capture reads block for up to the source's read timeout, so the pipeline
/// stays off the async workers. Stopping is up to the source, which is
/// expected to end the stream once its shutdown token is cancelled.
pub struct CaptureJob<O: CaptureOpener> {
    ingest: Arc<IngestFrameUseCase>,
    opener: O,
    interface: String,
}

impl<O> CaptureJob<O>
where
    O: CaptureOpener + 'static,
{
    pub fn new(ingest: Arc<IngestFrameUseCase>, opener: O, interface: impl Into<String>) -> Self {
        Self {
            ingest,
            opener,
            interface: interface.into(),
        }
    }

    pub fn start(self) -> JoinHandle<Result<CaptureSummary, CaptureError>> {
        info!(interface = %self.interface, "Starting capture job");

        tokio::task::spawn_blocking(move || {
            let mut pipeline = CapturePipeline::new(self.ingest);
            pipeline.set_interface(self.interface);

            let result = pipeline.run(&self.opener);
            match &result {
                Ok(summary) => info!(
                    frames = summary.frames_seen,
                    arp = summary.arp_observed,
                    "CaptureJob: finished"
                ),
                Err(e) => error!(error = %e, state = %pipeline.state(), "CaptureJob: failed"),
            }
            result
        })
    }
}
