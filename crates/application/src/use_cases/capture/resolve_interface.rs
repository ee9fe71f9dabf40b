use arpscope_domain::{CaptureConfig, Route, RouteError};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::ports::RouteResolver;

/// Interface the capture should attach to, with the routes that led there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTarget {
    pub interface: String,
    pub routes: Vec<Route>,
}

/// Use case: Pick the capture interface
///
/// An explicit interface override skips route discovery. Otherwise one route
/// is resolved per target CIDR and the first one found decides the
/// interface; with no CIDR the configured probe target is used.
pub struct ResolveCaptureInterfaceUseCase {
    resolver: Arc<dyn RouteResolver>,
}

impl ResolveCaptureInterfaceUseCase {
    pub fn new(resolver: Arc<dyn RouteResolver>) -> Self {
        Self { resolver }
    }

    #[instrument(skip(self, config))]
    pub async fn execute(&self, config: &CaptureConfig) -> Result<CaptureTarget, RouteError> {
        if let Some(interface) = &config.interface {
            info!(interface = %interface, "Using interface override");
            return Ok(CaptureTarget {
                interface: interface.clone(),
                routes: Vec::new(),
            });
        }

        if config.target_cidrs.is_empty() {
            let egress = self.resolver.resolve(&config.route_probe_target).await?;
            info!(
                target = %config.route_probe_target,
                interface = %egress.interface_name,
                local_addr = %egress.local_addr,
                "Resolved egress interface"
            );
            return Ok(CaptureTarget {
                interface: egress.interface_name,
                routes: Vec::new(),
            });
        }

        let mut routes = Vec::with_capacity(config.target_cidrs.len());
        let mut last_error = None;

        for network in &config.target_cidrs {
            match self.resolver.resolve_route(*network).await {
                Ok(route) => {
                    info!(
                        network = %route.network,
                        interface = %route.interface_name,
                        local_addr = %route.local_addr,
                        direct = route.is_directly_attached(),
                        "Resolved route"
                    );
                    routes.push(route);
                }
                Err(e) => {
                    warn!(network = %network, error = %e, "Failed to resolve route");
                    last_error = Some(e);
                }
            }
        }

        match routes.first() {
            Some(first) => {
                let interface = first.interface_name.clone();
                if routes.iter().any(|r| r.interface_name != interface) {
                    warn!(
                        interface = %interface,
                        "Target networks use several interfaces; capturing on the first"
                    );
                }
                Ok(CaptureTarget { interface, routes })
            }
            None => Err(last_error.unwrap_or_else(|| {
                RouteError::NoMatchingInterface("no target network resolved".to_string())
            })),
        }
    }
}
