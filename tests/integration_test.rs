//! Integration tests for pdb-intersect
//!
//! These tests run the public lookups against a directory snapshot.

use pdb_intersect::{
    exchange_for_address, intersect_by_asn,
    models::coarse_key,
    output::{render_table, CsvSink, ReportSink},
    peeringdb::{Entity, Filter, InMemoryDirectory},
    prefixes_for_exchange, PdbError,
};
use std::path::Path;

const SNAPSHOT: &str = "src/tests/test_data/directory_snapshot.json";

fn snapshot() -> InMemoryDirectory {
    InMemoryDirectory::from_json_file(Path::new(SNAPSHOT)).expect("Failed to load snapshot")
}

#[test]
fn test_snapshot_loaded() {
    let dir = snapshot();
    assert_eq!(dir.len(Entity::Ix), 3);
    assert_eq!(dir.len(Entity::NetIxLan), 7);
}

#[test]
fn test_exchange_for_ipv4() {
    let dir = snapshot();
    let ix = exchange_for_address(&dir, "198.51.100.7")
        .expect("Lookup failed")
        .expect("Expected an exchange");
    // 198.51.0.0/16 at LINX also contains the address, but comes later
    assert_eq!(ix.name, "AMS-IX");
}

#[test]
fn test_exchange_for_ipv4_wider_prefix() {
    let dir = snapshot();
    let ix = exchange_for_address(&dir, "198.51.101.7")
        .expect("Lookup failed")
        .expect("Expected an exchange");
    assert_eq!(ix.name, "LINX LON1");
}

#[test]
fn test_exchange_for_exploded_ipv6() {
    let dir = snapshot();
    let ix = exchange_for_address(&dir, "2001:0db8:0020:0000:0000:0000:0000:0042")
        .expect("Lookup failed")
        .expect("Expected an exchange");
    assert_eq!(ix.name, "DE-CIX Frankfurt");
}

#[test]
fn test_exchange_for_address_not_found() {
    let dir = snapshot();
    assert!(exchange_for_address(&dir, "198.52.0.1")
        .expect("Lookup failed")
        .is_none());
    assert!(exchange_for_address(&dir, "2001:db8:30::1")
        .expect("Lookup failed")
        .is_none());
}

#[test]
fn test_exchange_for_invalid_address() {
    let dir = snapshot();
    assert!(matches!(
        exchange_for_address(&dir, "198.51.100"),
        Err(PdbError::InvalidAddress(_))
    ));
}

#[test]
fn test_coarse_key_same_for_padded_forms() {
    for (plain, padded) in [
        ("198.51.100.7", "198.051.100.007"),
        ("2001:db8:6::714:1", "2001:0db8:0006:0000:0000:0000:0714:0001"),
        ("2001:7f8:0:1::5", "2001:07f8:0000:0001:0000:0000:0000:0005"),
    ] {
        assert_eq!(coarse_key(plain).unwrap(), coarse_key(padded).unwrap());
    }
}

#[test]
fn test_intersect_whole_orgs() {
    let dir = snapshot();
    let report = intersect_by_asn(&dir, 3557, 64500, "", "").expect("Intersect failed");

    assert_eq!(report.header.exchange, "IX");
    assert_eq!(report.header.side_a, "Root Server Ops");
    assert_eq!(report.header.side_b, "Example Networks");

    // DE-CIX is shared at the exchange level only, on different lans
    let lans: Vec<u32> = report.rows.iter().map(|r| r.ixlan_id).collect();
    assert_eq!(lans, vec![10, 30]);

    let ams = &report.rows[0];
    assert_eq!(ams.exchange, "AMS-IX");
    assert_eq!(ams.side_a.len(), 1);
    assert_eq!(ams.side_b.len(), 2);

    let linx = &report.rows[1];
    assert_eq!(linx.side_a[0].asn, 1280);
    assert_eq!(linx.side_b[0].asn, 64500);
}

#[test]
fn test_intersect_with_notes_pattern() {
    let dir = snapshot();
    let report = intersect_by_asn(&dir, 1280, 64500, "3557", "").expect("Intersect failed");
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].exchange, "AMS-IX");
    assert_eq!(report.rows[0].side_a[0].asn, 3557);
}

#[test]
fn test_intersect_uses_bulk_asn_query() {
    let dir = snapshot();
    intersect_by_asn(&dir, 3557, 64500, "", "").expect("Intersect failed");
    let attachment_queries: Vec<Filter> = dir
        .queries()
        .into_iter()
        .filter(|(entity, _)| *entity == Entity::NetIxLan)
        .map(|(_, filter)| filter)
        .collect();
    assert_eq!(
        attachment_queries,
        vec![
            Filter::new().one_of("asn", [3557, 1280]),
            Filter::new().one_of("asn", [64500]),
        ]
    );
}

#[test]
fn test_intersect_no_common_lans() {
    let dir = snapshot();
    let report = intersect_by_asn(&dir, 64500, 64510, "", "").expect("Intersect failed");
    assert!(report.rows.is_empty());
    assert_eq!(report.header.side_b, "Lonely Org");
}

#[test]
fn test_intersect_unknown_asn() {
    let dir = snapshot();
    assert!(matches!(
        intersect_by_asn(&dir, 3557, 65535, "", ""),
        Err(PdbError::UnknownAsn(65535))
    ));
}

#[test]
fn test_intersect_pattern_excludes_everything() {
    let dir = snapshot();
    assert!(matches!(
        intersect_by_asn(&dir, 3557, 64500, "no such note", ""),
        Err(PdbError::NoNetworks(3557))
    ));
}

#[test]
fn test_report_rendering() {
    let dir = snapshot();
    let report = intersect_by_asn(&dir, 3557, 64500, "", "").expect("Intersect failed");

    let table = render_table(&report.header, &report.rows);
    assert!(table.contains("| AMS-IX "));
    assert!(table.contains("LINX LON1"));
    assert!(!table.contains("DE-CIX"));
    assert!(table.contains("IPv6: 2001:db8:10::20"));

    let mut out = Vec::new();
    CsvSink::new(&mut out)
        .emit(&report.header, &report.rows)
        .expect("CSV output failed");
    let csv = String::from_utf8(out).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.starts_with("IX,Root Server Ops,Example Networks\n"));
}

#[test]
fn test_prefixes_for_exchange() {
    let dir = snapshot();
    let prefixes = prefixes_for_exchange(&dir, 2).expect("Lookup failed");
    let texts: Vec<&str> = prefixes.iter().map(|p| p.prefix.as_str()).collect();
    assert_eq!(
        texts,
        vec!["203.0.113.0/25", "2001:db8:20::/64", "203.0.113.128/25"]
    );
}
