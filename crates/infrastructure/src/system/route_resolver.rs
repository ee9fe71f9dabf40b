use arpscope_application::ports::RouteResolver;
use arpscope_domain::{EgressPath, LocalInterface, RouteError};
use async_trait::async_trait;
use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::debug;

const PROBE_PORT: u16 = 80;

/// Finds the egress interface for a target by connecting an unbound UDP
/// socket to it and matching the local address the kernel picked.
///
/// Connecting a datagram socket only runs route selection; nothing is sent.
pub struct UdpProbeRouteResolver {
    timeout: Duration,
    interfaces: Option<Vec<LocalInterface>>,
}

impl UdpProbeRouteResolver {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(timeout_ms),
            interfaces: None,
        }
    }

    /// Match against a fixed interface list instead of enumerating devices.
    pub fn with_interfaces(mut self, interfaces: Vec<LocalInterface>) -> Self {
        self.interfaces = Some(interfaces);
        self
    }

    async fn probe_local_addr(&self, target: IpAddr) -> Result<IpAddr, RouteError> {
        let bind_addr: SocketAddr = match target {
            IpAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            IpAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let connect_err = |e: std::io::Error| RouteError::Connect {
            target: target.to_string(),
            reason: e.to_string(),
        };

        let probe = async {
            let socket = UdpSocket::bind(bind_addr).await.map_err(connect_err)?;
            socket
                .connect((target, PROBE_PORT))
                .await
                .map_err(connect_err)?;
            socket.local_addr().map_err(connect_err)
        };

        let local = bounded(self.timeout, target, probe).await?;
        Ok(local.ip())
    }

    fn local_interfaces(&self) -> Result<Vec<LocalInterface>, RouteError> {
        match &self.interfaces {
            Some(interfaces) => Ok(interfaces.clone()),
            None => list_devices(),
        }
    }
}

#[async_trait]
impl RouteResolver for UdpProbeRouteResolver {
    async fn resolve(&self, target: &str) -> Result<EgressPath, RouteError> {
        let target_ip: IpAddr = target
            .trim()
            .parse()
            .map_err(|_| RouteError::InvalidTarget(target.to_string()))?;

        let local_addr = self.probe_local_addr(target_ip).await?;
        debug!(target = %target_ip, local_addr = %local_addr, "Route probe connected");

        let interfaces = self.local_interfaces()?;
        let interface = match_interface(&interfaces, local_addr)
            .ok_or_else(|| RouteError::NoMatchingInterface(local_addr.to_string()))?;

        Ok(EgressPath {
            interface_name: interface.name.clone(),
            local_addr,
        })
    }
}

/// Run `probe` for at most `limit`, reporting an overrun as a route timeout.
async fn bounded<T, F>(limit: Duration, target: IpAddr, probe: F) -> Result<T, RouteError>
where
    F: Future<Output = Result<T, RouteError>>,
{
    match timeout(limit, probe).await {
        Ok(result) => result,
        Err(_) => Err(RouteError::Timeout {
            target: target.to_string(),
            timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}

/// First interface that owns `local_addr`.
pub fn match_interface(
    interfaces: &[LocalInterface],
    local_addr: IpAddr,
) -> Option<&LocalInterface> {
    interfaces.iter().find(|iface| iface.owns(local_addr))
}

fn list_devices() -> Result<Vec<LocalInterface>, RouteError> {
    let devices =
        pcap::Device::list().map_err(|e| RouteError::InterfaceEnumeration(e.to_string()))?;

    Ok(devices
        .into_iter()
        .map(|device| {
            let addresses = device.addresses.iter().map(|a| a.addr).collect();
            LocalInterface::new(device.name, addresses)
        })
        .collect())
}
