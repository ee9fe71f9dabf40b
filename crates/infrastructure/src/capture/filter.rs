/// ARP traffic that is not link-layer broadcast: replies and unicast
/// requests, which carry reliable sender bindings.
pub const ARP_FILTER: &str = "arp and not ether dst ff:ff:ff:ff:ff:ff";

/// BPF expression installed on the capture handle.
pub fn filter_expression(capture_icmp: bool) -> String {
    if capture_icmp {
        format!("({}) or icmp", ARP_FILTER)
    } else {
        ARP_FILTER.to_string()
    }
}
