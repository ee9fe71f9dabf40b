use ipnetwork::IpNetwork;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Interface and local address the OS picked to reach a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EgressPath {
    pub interface_name: String,
    pub local_addr: IpAddr,
}

/// Path used to reach one monitored network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Remote network being monitored
    pub network: IpNetwork,
    /// Gateway in use, `None` when directly attached or unknown
    pub gateway: Option<IpAddr>,
    /// Local address of the chosen interface
    pub local_addr: IpAddr,
    /// Interface that carries traffic for `network`
    pub interface_name: String,
}

impl Route {
    pub fn from_egress(network: IpNetwork, egress: EgressPath) -> Self {
        Self {
            network,
            gateway: None,
            local_addr: egress.local_addr,
            interface_name: egress.interface_name,
        }
    }

    /// True when the local address sits inside the monitored network.
    pub fn is_directly_attached(&self) -> bool {
        self.network.contains(self.local_addr)
    }
}

/// A local network interface and the addresses bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalInterface {
    pub name: String,
    pub addresses: Vec<IpAddr>,
}

impl LocalInterface {
    pub fn new(name: impl Into<String>, addresses: Vec<IpAddr>) -> Self {
        Self {
            name: name.into(),
            addresses,
        }
    }

    pub fn owns(&self, addr: IpAddr) -> bool {
        self.addresses.iter().any(|a| same_address(*a, addr))
    }
}

// IPv4-mapped IPv6 addresses compare equal to their IPv4 form.
fn same_address(a: IpAddr, b: IpAddr) -> bool {
    match (a, b) {
        (IpAddr::V4(a), IpAddr::V6(b)) | (IpAddr::V6(b), IpAddr::V4(a)) => {
            b.to_ipv4_mapped() == Some(a)
        }
        _ => a == b,
    }
}

/// Address probed to discover the route for `network`: the first host
/// address, or the address itself for single-host prefixes.
pub fn representative_address(network: IpNetwork) -> IpAddr {
    match network {
        IpNetwork::V4(net) => {
            if net.prefix() >= 31 {
                return IpAddr::V4(net.ip());
            }
            let base = u32::from(net.network());
            IpAddr::V4(Ipv4Addr::from(base.saturating_add(1)))
        }
        IpNetwork::V6(net) => {
            if net.prefix() >= 127 {
                return IpAddr::V6(net.ip());
            }
            let base = u128::from(net.network());
            IpAddr::V6(Ipv6Addr::from(base.saturating_add(1)))
        }
    }
}
