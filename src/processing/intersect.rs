//! Presence intersection of two sets of exchange-lan attachments.
//!
//! Attachments are grouped per exchange-lan on each side, the two key sets are
//! intersected, and every shared exchange-lan becomes one [`MergedRow`]. The
//! key is the exchange-lan, not the exchange point: two networks on different
//! lans of the same exchange are not considered common.

use crate::models::Attachment;
use itertools::Itertools;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// One attachment as shown in a report cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceEntry {
    pub asn: u32,
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
}

impl From<&Attachment> for PresenceEntry {
    fn from(attachment: &Attachment) -> Self {
        PresenceEntry {
            asn: attachment.asn,
            ipv4: attachment.ipaddr4.clone(),
            ipv6: attachment.ipaddr6.clone(),
        }
    }
}

impl PresenceEntry {
    /// Single line form, e.g. `AS64500 198.51.100.10 2001:db8::10`.
    pub fn compact(&self) -> String {
        format!(
            "AS{} {} {}",
            self.asn,
            self.ipv4.as_deref().unwrap_or("None"),
            self.ipv6.as_deref().unwrap_or("None")
        )
    }
}

impl fmt::Display for PresenceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ASN:  {}\nIPv4: {}\nIPv6: {}",
            self.asn,
            self.ipv4.as_deref().unwrap_or("None"),
            self.ipv6.as_deref().unwrap_or("None")
        )
    }
}

/// Both sides' attachments at one shared exchange-lan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRow {
    pub ixlan_id: u32,
    /// Exchange display name, from the first side-A attachment.
    pub exchange: String,
    pub side_a: Vec<PresenceEntry>,
    pub side_b: Vec<PresenceEntry>,
}

impl MergedRow {
    /// Side A entries, blank line separated.
    pub fn side_a_text(&self) -> String {
        self.side_a.iter().join("\n\n")
    }

    pub fn side_b_text(&self) -> String {
        self.side_b.iter().join("\n\n")
    }
}

/// Group attachments by exchange-lan, keeping input order inside each group.
pub fn group_by_lan(attachments: &[Attachment]) -> HashMap<u32, Vec<&Attachment>> {
    attachments
        .iter()
        .into_group_map_by(|attachment| attachment.ixlan_id)
}

/// One row per exchange-lan present on both sides.
///
/// Rows come out in ascending exchange-lan id. That order carries no meaning,
/// sinks sort rows for display.
pub fn intersect(attachments_a: &[Attachment], attachments_b: &[Attachment]) -> Vec<MergedRow> {
    let groups_a = group_by_lan(attachments_a);
    let groups_b = group_by_lan(attachments_b);

    let keys_a: HashSet<u32> = groups_a.keys().copied().collect();
    let keys_b: HashSet<u32> = groups_b.keys().copied().collect();
    let common: Vec<u32> = keys_a.intersection(&keys_b).copied().sorted().collect();

    log::info!(
        "ixlans: {} on side A, {} on side B, {} in common",
        keys_a.len(),
        keys_b.len(),
        common.len()
    );

    common
        .into_iter()
        .filter_map(|ixlan_id| {
            let bucket_a = groups_a.get(&ixlan_id)?;
            let bucket_b = groups_b.get(&ixlan_id)?;
            Some(MergedRow {
                ixlan_id,
                exchange: bucket_a.first()?.name.clone(),
                side_a: bucket_a.iter().map(|a| PresenceEntry::from(*a)).collect(),
                side_b: bucket_b.iter().map(|b| PresenceEntry::from(*b)).collect(),
            })
        })
        .collect()
}
