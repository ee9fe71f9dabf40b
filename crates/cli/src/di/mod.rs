use arpscope_application::ports::{Clock, FrameDecoder, RouteResolver};
use arpscope_application::services::HostCache;
use arpscope_application::use_cases::{
    ExpireStaleHostsUseCase, GetHostsUseCase, IngestFrameUseCase, ResolveCaptureInterfaceUseCase,
};
use arpscope_domain::Config;
use arpscope_infrastructure::capture::{CaptureSettings, PcapCaptureOpener, PnetFrameDecoder};
use arpscope_infrastructure::system::{SystemClock, UdpProbeRouteResolver};
use arpscope_jobs::HostExpiryJob;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct Services {
    pub cache: Arc<HostCache>,
    pub ingest_frame: Arc<IngestFrameUseCase>,
    pub resolve_interface: Arc<ResolveCaptureInterfaceUseCase>,
    pub get_hosts: Arc<GetHostsUseCase>,
    pub capture_opener: PcapCaptureOpener,
}

impl Services {
    pub fn new(config: &Config, shutdown: CancellationToken) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
        let cache = Arc::new(match config.cache.max_events {
            Some(max) => HostCache::with_max_events(clock, max),
            None => HostCache::new(clock),
        });

        let decoder: Arc<dyn FrameDecoder> = Arc::new(PnetFrameDecoder::new());
        let resolver: Arc<dyn RouteResolver> =
            Arc::new(UdpProbeRouteResolver::new(config.capture.route_timeout_ms));

        Self {
            ingest_frame: Arc::new(
                IngestFrameUseCase::new(decoder, cache.clone())
                    .with_timestamp_source(config.capture.timestamp_source),
            ),
            resolve_interface: Arc::new(ResolveCaptureInterfaceUseCase::new(resolver)),
            get_hosts: Arc::new(GetHostsUseCase::new(cache.clone())),
            capture_opener: PcapCaptureOpener::new(
                CaptureSettings::from_config(&config.capture),
                shutdown,
            ),
            cache,
        }
    }

    pub fn host_expiry_job(&self, config: &Config) -> HostExpiryJob {
        let expire = Arc::new(ExpireStaleHostsUseCase::new(
            self.cache.clone(),
            config.cache.host_ttl_secs,
        ));
        HostExpiryJob::new(expire).with_interval(config.cache.expiry_interval_secs)
    }
}
