//! Exchange-lan prefix (`ixpfx`) record.

use super::AddressFamily;
use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A CIDR block advertised at an exchange-lan.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    pub id: u32,
    /// Parent exchange-lan.
    pub ixlan_id: u32,
    /// `"IPv4"` or `"IPv6"` as stored by the directory.
    #[serde(default)]
    pub protocol: String,
    /// CIDR text, e.g. `"198.51.100.0/24"`.
    pub prefix: String,
}

impl Prefix {
    /// Parse the prefix text as a network of the given family.
    ///
    /// Returns `None` for text that is not a CIDR block, has host bits set,
    /// or belongs to the other family. Directory data is third-party and
    /// callers are expected to skip such records.
    pub fn network(&self, family: AddressFamily) -> Option<IpNet> {
        let net: IpNet = self.prefix.trim().parse().ok()?;
        if net.trunc() != net {
            return None;
        }
        match (net, family) {
            (IpNet::V4(_), AddressFamily::V4) | (IpNet::V6(_), AddressFamily::V6) => Some(net),
            _ => None,
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ixlan {})", self.prefix, self.ixlan_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pfx(text: &str) -> Prefix {
        Prefix {
            id: 1,
            ixlan_id: 10,
            protocol: String::new(),
            prefix: text.to_string(),
        }
    }

    #[test]
    fn test_network_ipv4() {
        let net = pfx("198.51.100.0/24").network(AddressFamily::V4).unwrap();
        assert_eq!(net.to_string(), "198.51.100.0/24");
        assert!(pfx("198.51.100.0/24").network(AddressFamily::V6).is_none());
    }

    #[test]
    fn test_network_ipv6() {
        let net = pfx("2001:7f8::/64").network(AddressFamily::V6).unwrap();
        assert_eq!(net.prefix_len(), 64);
    }

    #[test]
    fn test_network_malformed() {
        assert!(pfx("garbage").network(AddressFamily::V4).is_none());
        assert!(pfx("198.51.100.0/33").network(AddressFamily::V4).is_none());
        assert!(pfx("198.51.100.0").network(AddressFamily::V4).is_none());
        assert!(pfx("").network(AddressFamily::V4).is_none());
    }

    #[test]
    fn test_network_host_bits_set() {
        assert!(pfx("198.51.100.1/24").network(AddressFamily::V4).is_none());
    }
}
