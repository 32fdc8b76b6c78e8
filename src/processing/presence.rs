//! Organization presence: ASN → organization → networks → attachments.
//!
//! Networks of one organization are not linked to each other in the
//! directory, only through the organization record. Walking up from one ASN to
//! its organization and back down to every network of that organization gives
//! the full set of exchange-lan attachments for that organization.

use crate::error::{PdbError, Result};
use crate::models::{Attachment, Network, Organization};
use crate::peeringdb::{fetch_first, fetch_records, Directory, Entity, Filter};
use regex::Regex;

/// Everything known about one organization's exchange presence.
#[derive(Debug, Clone)]
pub struct OrgPresence {
    pub org: Organization,
    pub networks: Vec<Network>,
    pub attachments: Vec<Attachment>,
}

/// Compile a notes filter. An empty pattern means "no filter".
///
/// The pattern matches anywhere in the notes text.
pub fn notes_pattern(raw: &str) -> Result<Option<Regex>> {
    if raw.is_empty() {
        return Ok(None);
    }
    Ok(Some(Regex::new(raw)?))
}

/// Organization owning the first network with this ASN.
pub fn org_id_for_asn<D: Directory + ?Sized>(directory: &D, asn: u32) -> Result<Option<u32>> {
    let net: Option<Network> = fetch_first(directory, Entity::Net, &Filter::new().eq("asn", asn))?;
    Ok(net.map(|n| n.org_id))
}

pub fn organization<D: Directory + ?Sized>(
    directory: &D,
    org_id: u32,
) -> Result<Option<Organization>> {
    fetch_first(directory, Entity::Org, &Filter::new().eq("id", org_id))
}

/// All networks of an organization whose notes match `pattern`.
pub fn networks_for_org<D: Directory + ?Sized>(
    directory: &D,
    org_id: u32,
    pattern: Option<&Regex>,
) -> Result<Vec<Network>> {
    let mut nets: Vec<Network> =
        fetch_records(directory, Entity::Net, &Filter::new().eq("org_id", org_id))?;
    let total = nets.len();
    if let Some(re) = pattern {
        nets.retain(|n| re.is_match(&n.notes));
        log::debug!(
            "org {org_id}: {} of {total} network(s) match notes pattern '{re}'",
            nets.len()
        );
    }
    Ok(nets)
}

/// Attachments of all given networks, fetched in one bulk ASN query.
pub fn attachments_for_networks<D: Directory + ?Sized>(
    directory: &D,
    nets: &[Network],
) -> Result<Vec<Attachment>> {
    if nets.is_empty() {
        return Ok(Vec::new());
    }
    let asns = nets.iter().map(|n| n.asn);
    fetch_records(directory, Entity::NetIxLan, &Filter::new().one_of("asn", asns))
}

/// Resolve the organization behind `asn` and collect its exchange presence.
///
/// # Errors
/// * `PdbError::UnknownAsn` - no network carries this ASN
/// * `PdbError::NoNetworks` - the organization has no network matching `pattern`
pub fn org_presence<D: Directory + ?Sized>(
    directory: &D,
    asn: u32,
    pattern: Option<&Regex>,
) -> Result<OrgPresence> {
    let org_id = org_id_for_asn(directory, asn)?.ok_or(PdbError::UnknownAsn(asn))?;
    let networks = networks_for_org(directory, org_id, pattern)?;
    if networks.is_empty() {
        return Err(PdbError::NoNetworks(asn));
    }
    let attachments = attachments_for_networks(directory, &networks)?;

    let org = organization(directory, org_id)?.unwrap_or_else(|| {
        log::warn!("org {org_id} not found, using placeholder name");
        Organization {
            id: org_id,
            name: format!("org {org_id}"),
        }
    });

    log::info!(
        "AS{asn}: org '{}' with {} network(s) and {} attachment(s)",
        org.name,
        networks.len(),
        attachments.len()
    );
    Ok(OrgPresence {
        org,
        networks,
        attachments,
    })
}
