//! Textual address canonicalization.
//!
//! Addresses coming out of "exploded" forms carry zero-padded components
//! (`010.001.002.003`, `2001:0de8:0006:...`). `std::net` refuses leading zeros
//! in IPv4 octets because of the octal ambiguity, so everything is passed
//! through [`normalize`] before parsing.

use crate::error::{PdbError, Result};
use std::fmt;
use std::net::IpAddr;

/// Number of leading IPv6 groups considered for the coarse key.
const V6_COARSE_GROUPS: usize = 6;

/// IP protocol family, spelled the way the directory spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    pub fn of(ip: &IpAddr) -> AddressFamily {
        match ip {
            IpAddr::V4(_) => AddressFamily::V4,
            IpAddr::V6(_) => AddressFamily::V6,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => write!(f, "IPv4"),
            AddressFamily::V6 => write!(f, "IPv6"),
        }
    }
}

/// Strip leading zeros from every component of a textual address.
///
/// Four dot-separated components mean IPv4, otherwise the text is split on
/// colons. Text without either separator is returned unchanged. Empty
/// components produced by `::` compression are kept empty so the compressed
/// form stays parseable.
///
/// # Examples
/// ```
/// use pdb_intersect::models::normalize;
/// assert_eq!(normalize("010.001.002.003"), "10.1.2.3");
/// assert_eq!(normalize("2001:0de8:0006::0714:0001"), "2001:de8:6::714:1");
/// ```
pub fn normalize(raw: &str) -> String {
    let dotted: Vec<&str> = raw.split('.').collect();
    if dotted.len() == 4 {
        return dotted
            .into_iter()
            .map(strip_dotted_component)
            .collect::<Vec<String>>()
            .join(".");
    }

    let coloned: Vec<&str> = raw.split(':').collect();
    if coloned.len() == 1 {
        return raw.to_string();
    }
    coloned
        .into_iter()
        .map(strip_leading_zeros)
        .collect::<Vec<&str>>()
        .join(":")
}

/// In an IPv4-mapped address the first octet shares a component with the
/// colon groups in front of it (`::ffff:010`).
fn strip_dotted_component(part: &str) -> String {
    match part.rsplit_once(':') {
        Some((groups, octet)) => format!("{}:{}", normalize(groups), strip_leading_zeros(octet)),
        None => strip_leading_zeros(part).to_string(),
    }
}

fn strip_leading_zeros(part: &str) -> &str {
    if part.is_empty() {
        return part;
    }
    match part.trim_start_matches('0') {
        "" => "0",
        stripped => stripped,
    }
}

/// Normalize and parse a host address.
pub fn parse_address(raw: &str) -> Result<IpAddr> {
    let normalized = normalize(raw.trim());
    normalized
        .parse::<IpAddr>()
        .map_err(|_| PdbError::InvalidAddress(raw.to_string()))
}

/// Coarse textual prefix of an address, used to narrow a prefix search.
///
/// IPv4 gives the first two octets (`"198.51"`). IPv6 keeps the first six
/// groups of the exploded form, drops trailing all-zero groups and strips
/// leading zeros, matching how the directory stores compressed prefixes
/// (`2001:de8:6::714:1` gives `"2001:de8:6"`).
///
/// This is only a pre-filter. A match on the key says nothing about
/// containment.
pub fn coarse_key(addr: &str) -> Result<String> {
    Ok(coarse_key_for(parse_address(addr)?))
}

pub fn coarse_key_for(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => {
            let octets = v4.octets();
            format!("{}.{}", octets[0], octets[1])
        }
        IpAddr::V6(v6) => {
            let exploded: Vec<String> = v6
                .segments()
                .iter()
                .take(V6_COARSE_GROUPS)
                .map(|group| format!("{group:04x}"))
                .collect();

            let mut kept: Vec<&str> = Vec::with_capacity(V6_COARSE_GROUPS);
            let mut at_end = true;
            for group in exploded.iter().rev() {
                if at_end && group == "0000" {
                    continue;
                }
                at_end = false;
                kept.push(strip_leading_zeros(group));
            }
            kept.reverse();
            kept.join(":")
        }
    }
}
