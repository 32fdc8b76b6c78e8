//! Organization (`org`), network (`net`) and network-at-exchange-lan
//! (`netixlan`) records.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: u32,
    pub name: String,
}

/// A network (ASN) owned by an organization.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Network {
    pub id: u32,
    pub org_id: u32,
    pub asn: u32,
    #[serde(default)]
    pub name: String,
    /// Free text notes; used to pick a subset of an organization's networks.
    #[serde(default)]
    pub notes: String,
}

/// A network's presence at one exchange-lan.
///
/// One network may have several attachments on the same exchange-lan.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    #[serde(default)]
    pub id: u32,
    pub ixlan_id: u32,
    pub net_id: u32,
    pub asn: u32,
    #[serde(default)]
    pub ipaddr4: Option<String>,
    #[serde(default)]
    pub ipaddr6: Option<String>,
    /// Display name of the exchange, as denormalized by the directory.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ix_id: Option<u32>,
}
