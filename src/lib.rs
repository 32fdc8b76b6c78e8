//! Peering directory lookups.
//!
//! Two lookups on top of a PeeringDB style directory:
//! - which exchange point an IP address belongs to ([`exchange_for_address`])
//! - at which exchange-lans two organizations are both present ([`intersect_by_asn`])
//!
//! Directory access goes through the [`peeringdb::Directory`] trait, so every
//! lookup runs the same against the live API or an in-memory snapshot.

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod peeringdb;
pub mod processing;

pub use error::{PdbError, Result};

use models::{ExchangePoint, Prefix};
use output::ReportHeader;
use peeringdb::Directory;
use processing::{intersect, notes_pattern, org_presence, MergedRow, PrefixResolver};

/// Label of the exchange column.
pub const EXCHANGE_COLUMN: &str = "IX";

/// Intersection result ready for a [`output::ReportSink`].
#[derive(Debug, Clone)]
pub struct Report {
    pub header: ReportHeader,
    pub rows: Vec<MergedRow>,
}

/// Exchange-lans shared by the organizations behind `asn1` and `asn2`.
///
/// Each ASN is resolved to its organization, then to all networks of that
/// organization whose notes match the pattern (`""` keeps all of them).
///
/// # Arguments
/// * `asn1`, `asn2` - any ASN of each organization
/// * `pat1`, `pat2` - regex on the networks' notes field, unanchored
pub fn intersect_by_asn<D: Directory + ?Sized>(
    directory: &D,
    asn1: u32,
    asn2: u32,
    pat1: &str,
    pat2: &str,
) -> Result<Report> {
    log::info!("#Start intersect_by_asn({asn1}, {asn2})");
    let pat1 = notes_pattern(pat1)?;
    let pat2 = notes_pattern(pat2)?;

    let side_a = org_presence(directory, asn1, pat1.as_ref())?;
    let side_b = org_presence(directory, asn2, pat2.as_ref())?;

    let rows = intersect(&side_a.attachments, &side_b.attachments);
    Ok(Report {
        header: ReportHeader::new(EXCHANGE_COLUMN, &side_a.org.name, &side_b.org.name),
        rows,
    })
}

/// Exchange point whose advertised prefix contains `addr`, if any.
pub fn exchange_for_address<D: Directory + ?Sized>(
    directory: &D,
    addr: &str,
) -> Result<Option<ExchangePoint>> {
    PrefixResolver::new(directory).resolve_exchange_for_address(addr)
}

/// All prefixes of an exchange point.
pub fn prefixes_for_exchange<D: Directory + ?Sized>(directory: &D, ix_id: u32) -> Result<Vec<Prefix>> {
    PrefixResolver::new(directory).prefixes_for_exchange(ix_id)
}
