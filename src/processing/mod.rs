//! Lookup and correlation logic.
//!
//! This module contains the logic built on top of directory queries:
//! - [`resolver`] - Address to exchange point resolution
//! - [`intersect`] - Common exchange-lans of two attachment sets
//! - [`presence`] - Organization to attachments collection

mod intersect;
mod presence;
mod resolver;

// Re-export public functions
pub use intersect::{group_by_lan, intersect, MergedRow, PresenceEntry};
pub use presence::{
    attachments_for_networks, networks_for_org, notes_pattern, org_id_for_asn, org_presence,
    organization, OrgPresence,
};
pub use resolver::{first_containing, PrefixResolver};
