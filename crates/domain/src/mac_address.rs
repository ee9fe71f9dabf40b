use std::fmt;
use std::str::FromStr;

const MAC_LEN: usize = 6;

/// 48-bit Ethernet hardware address.
///
/// Accepts the three common textual layouts:
/// `00:1a:2b:3c:4d:5e`, `00-1a-2b-3c-4d-5e` and `001a.2b3c.4d5e`.
/// Always formats as lowercase, colon separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress([u8; MAC_LEN]);

impl MacAddress {
    pub const ZERO: MacAddress = MacAddress([0; MAC_LEN]);

    pub const fn new(octets: [u8; MAC_LEN]) -> Self {
        Self(octets)
    }

    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let octets: [u8; MAC_LEN] = bytes.try_into().ok()?;
        Some(Self(octets))
    }

    pub fn octets(&self) -> [u8; MAC_LEN] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    fn parse_groups(s: &str, sep: char, group_len: usize) -> Option<Self> {
        let groups: Vec<&str> = s.split(sep).collect();
        if groups.len() * group_len / 2 != MAC_LEN {
            return None;
        }

        let mut octets = [0u8; MAC_LEN];
        let mut idx = 0;
        for group in groups {
            if group.len() != group_len || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            for pair in group.as_bytes().chunks(2) {
                let text = std::str::from_utf8(pair).ok()?;
                octets[idx] = u8::from_str_radix(text, 16).ok()?;
                idx += 1;
            }
        }

        Some(Self(octets))
    }
}

impl FromStr for MacAddress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = if s.contains(':') {
            Self::parse_groups(s, ':', 2)
        } else if s.contains('-') {
            Self::parse_groups(s, '-', 2)
        } else if s.contains('.') {
            Self::parse_groups(s, '.', 4)
        } else {
            None
        };

        parsed.ok_or_else(|| format!("'{}' is not a 6-byte hardware address", s))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            a, b, c, d, e, g
        )
    }
}

impl From<[u8; MAC_LEN]> for MacAddress {
    fn from(octets: [u8; MAC_LEN]) -> Self {
        Self(octets)
    }
}
