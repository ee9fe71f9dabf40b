use arpscope_application::ports::FrameDecoder;
use arpscope_domain::{
    ArpObservation, ArpOperation, DecodedFrame, FrameDecodeError, IcmpEcho, MacAddress,
};
use pnet_packet::arp::{ArpHardwareTypes, ArpPacket};
use pnet_packet::ethernet::{EtherTypes, EthernetPacket};
use pnet_packet::icmp::{IcmpPacket, IcmpTypes};
use pnet_packet::ip::IpNextHeaderProtocols;
use pnet_packet::ipv4::Ipv4Packet;
use pnet_packet::Packet;

const ETHERNET_HW_LEN: u8 = 6;
const IPV4_PROTO_LEN: u8 = 4;
const ICMP_ECHO_HEADER_LEN: usize = 8;

/// Ethernet II decoder for ARP over IPv4 and ICMP echo.
#[derive(Debug, Default, Clone, Copy)]
pub struct PnetFrameDecoder;

impl PnetFrameDecoder {
    pub fn new() -> Self {
        Self
    }

    fn decode_arp(payload: &[u8]) -> Result<DecodedFrame, FrameDecodeError> {
        let arp = ArpPacket::new(payload).ok_or(FrameDecodeError::Truncated {
            layer: "arp",
            len: payload.len(),
        })?;

        let hardware = arp.get_hardware_type();
        let protocol = arp.get_protocol_type();
        if hardware != ArpHardwareTypes::Ethernet || protocol != EtherTypes::Ipv4 {
            return Err(FrameDecodeError::UnsupportedLinkLayer {
                hardware: hardware.0,
                protocol: protocol.0,
            });
        }

        let hw_len = arp.get_hw_addr_len();
        let proto_len = arp.get_proto_addr_len();
        if hw_len != ETHERNET_HW_LEN || proto_len != IPV4_PROTO_LEN {
            return Err(FrameDecodeError::UnsupportedAddressLength {
                hardware: hw_len,
                protocol: proto_len,
            });
        }

        Ok(DecodedFrame::Arp(ArpObservation {
            operation: ArpOperation::from(arp.get_operation().0),
            sender_ip: arp.get_sender_proto_addr(),
            sender_mac: MacAddress::new(arp.get_sender_hw_addr().octets()),
            target_ip: arp.get_target_proto_addr(),
            target_mac: MacAddress::new(arp.get_target_hw_addr().octets()),
        }))
    }

    fn decode_ipv4(payload: &[u8]) -> Result<DecodedFrame, FrameDecodeError> {
        let ip = Ipv4Packet::new(payload).ok_or(FrameDecodeError::Truncated {
            layer: "ipv4",
            len: payload.len(),
        })?;
        if ip.get_next_level_protocol() != IpNextHeaderProtocols::Icmp {
            return Ok(DecodedFrame::Ignored);
        }

        let body = ip.payload();
        let icmp = IcmpPacket::new(body).ok_or(FrameDecodeError::Truncated {
            layer: "icmp",
            len: body.len(),
        })?;

        let icmp_type = icmp.get_icmp_type();
        if icmp_type != IcmpTypes::EchoRequest && icmp_type != IcmpTypes::EchoReply {
            return Ok(DecodedFrame::Ignored);
        }
        if body.len() < ICMP_ECHO_HEADER_LEN {
            return Err(FrameDecodeError::Truncated {
                layer: "icmp",
                len: body.len(),
            });
        }

        Ok(DecodedFrame::IcmpEcho(IcmpEcho {
            source: ip.get_source(),
            destination: ip.get_destination(),
            icmp_type: icmp_type.0,
            code: icmp.get_icmp_code().0,
            payload: body[ICMP_ECHO_HEADER_LEN..].to_vec(),
        }))
    }
}

impl FrameDecoder for PnetFrameDecoder {
    fn decode(&self, frame: &[u8]) -> Result<DecodedFrame, FrameDecodeError> {
        let ethernet = EthernetPacket::new(frame).ok_or(FrameDecodeError::Truncated {
            layer: "ethernet",
            len: frame.len(),
        })?;

        match ethernet.get_ethertype() {
            EtherTypes::Arp => Self::decode_arp(ethernet.payload()),
            EtherTypes::Ipv4 => Self::decode_ipv4(ethernet.payload()),
            _ => Ok(DecodedFrame::Ignored),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const SENDER_MAC: [u8; 6] = [0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x60];
    const TARGET_MAC: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];

    fn ethernet(ethertype: u16, payload: &[u8]) -> Vec<u8> {
        let mut frame = Vec::with_capacity(14 + payload.len());
        frame.extend_from_slice(&TARGET_MAC);
        frame.extend_from_slice(&SENDER_MAC);
        frame.extend_from_slice(&ethertype.to_be_bytes());
        frame.extend_from_slice(payload);
        frame
    }

    fn arp_body(htype: u16, ptype: u16, hlen: u8, plen: u8, op: u16) -> Vec<u8> {
        let mut body = Vec::with_capacity(28);
        body.extend_from_slice(&htype.to_be_bytes());
        body.extend_from_slice(&ptype.to_be_bytes());
        body.push(hlen);
        body.push(plen);
        body.extend_from_slice(&op.to_be_bytes());
        body.extend_from_slice(&SENDER_MAC);
        body.extend_from_slice(&[192, 168, 1, 3]);
        body.extend_from_slice(&TARGET_MAC);
        body.extend_from_slice(&[192, 168, 1, 1]);
        body
    }

    fn ipv4_icmp(icmp: &[u8]) -> Vec<u8> {
        let total_len = (20 + icmp.len()) as u16;
        let mut packet = vec![0x45, 0x00];
        packet.extend_from_slice(&total_len.to_be_bytes());
        packet.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 64, 1, 0x00, 0x00]);
        packet.extend_from_slice(&[192, 168, 1, 5]);
        packet.extend_from_slice(&[8, 8, 8, 8]);
        packet.extend_from_slice(icmp);
        packet
    }

    #[test]
    fn test_decode_arp_reply() {
        let frame = ethernet(0x0806, &arp_body(1, 0x0800, 6, 4, 2));

        let decoded = PnetFrameDecoder::new().decode(&frame).unwrap();

        assert_eq!(
            decoded,
            DecodedFrame::Arp(ArpObservation {
                operation: ArpOperation::Reply,
                sender_ip: Ipv4Addr::new(192, 168, 1, 3),
                sender_mac: MacAddress::new(SENDER_MAC),
                target_ip: Ipv4Addr::new(192, 168, 1, 1),
                target_mac: MacAddress::new(TARGET_MAC),
            })
        );
    }

    #[test]
    fn test_decode_arp_request_with_padding() {
        let mut frame = ethernet(0x0806, &arp_body(1, 0x0800, 6, 4, 1));
        frame.extend_from_slice(&[0u8; 18]);

        match PnetFrameDecoder::new().decode(&frame).unwrap() {
            DecodedFrame::Arp(arp) => assert_eq!(arp.operation, ArpOperation::Request),
            other => panic!("expected ARP, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_arp_is_error() {
        let body = arp_body(1, 0x0800, 6, 4, 2);
        let frame = ethernet(0x0806, &body[..20]);

        assert_eq!(
            PnetFrameDecoder::new().decode(&frame),
            Err(FrameDecodeError::Truncated {
                layer: "arp",
                len: 20
            })
        );
    }

    #[test]
    fn test_truncated_ethernet_is_error() {
        let result = PnetFrameDecoder::new().decode(&[0u8; 10]);

        assert!(matches!(
            result,
            Err(FrameDecodeError::Truncated { layer: "ethernet", .. })
        ));
    }

    #[test]
    fn test_non_ethernet_arp_is_rejected() {
        let frame = ethernet(0x0806, &arp_body(6, 0x0800, 6, 4, 2));

        assert_eq!(
            PnetFrameDecoder::new().decode(&frame),
            Err(FrameDecodeError::UnsupportedLinkLayer {
                hardware: 6,
                protocol: 0x0800
            })
        );
    }

    #[test]
    fn test_odd_address_lengths_are_rejected() {
        let frame = ethernet(0x0806, &arp_body(1, 0x0800, 8, 4, 2));

        assert!(matches!(
            PnetFrameDecoder::new().decode(&frame),
            Err(FrameDecodeError::UnsupportedAddressLength { hardware: 8, protocol: 4 })
        ));
    }

    #[test]
    fn test_decode_icmp_echo_request() {
        let icmp = [8, 0, 0x00, 0x00, 0x12, 0x34, 0x00, 0x01, 0xde, 0xad, 0xbe, 0xef];
        let frame = ethernet(0x0800, &ipv4_icmp(&icmp));

        let decoded = PnetFrameDecoder::new().decode(&frame).unwrap();

        assert_eq!(
            decoded,
            DecodedFrame::IcmpEcho(IcmpEcho {
                source: Ipv4Addr::new(192, 168, 1, 5),
                destination: Ipv4Addr::new(8, 8, 8, 8),
                icmp_type: 8,
                code: 0,
                payload: vec![0xde, 0xad, 0xbe, 0xef],
            })
        );
    }

    #[test]
    fn test_other_icmp_and_ethertypes_are_ignored() {
        let unreachable = [3, 1, 0x00, 0x00, 0, 0, 0, 0];
        let frame = ethernet(0x0800, &ipv4_icmp(&unreachable));
        assert_eq!(
            PnetFrameDecoder::new().decode(&frame),
            Ok(DecodedFrame::Ignored)
        );

        let ipv6 = ethernet(0x86dd, &[0u8; 40]);
        assert_eq!(
            PnetFrameDecoder::new().decode(&ipv6),
            Ok(DecodedFrame::Ignored)
        );
    }
}
