//! In-memory [`Directory`] backed by a JSON snapshot.
//!
//! Snapshot layout is one array of raw records per entity:
//! `{"ix": [...], "ixlan": [...], "ixpfx": [...], ...}`.

use super::query::{Directory, Entity, Filter};
use crate::error::{PdbError, Result};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    records: HashMap<Entity, Vec<Value>>,
    /// Every query served, in order.
    queries: RefCell<Vec<(Entity, Filter)>>,
}

impl InMemoryDirectory {
    pub fn from_value(value: Value) -> Result<InMemoryDirectory> {
        let records: HashMap<Entity, Vec<Value>> = serde_json::from_value(value)
            .map_err(|e| PdbError::Snapshot(format!("invalid snapshot: {e}")))?;
        Ok(InMemoryDirectory {
            records,
            queries: RefCell::default(),
        })
    }

    pub fn from_json_str(json: &str) -> Result<InMemoryDirectory> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| PdbError::Snapshot(format!("invalid snapshot JSON: {e}")))?;
        InMemoryDirectory::from_value(value)
    }

    /// Load a snapshot file.
    pub fn from_json_file(path: &Path) -> Result<InMemoryDirectory> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| PdbError::Snapshot(format!("{}: {e}", path.display())))?;
        let directory = InMemoryDirectory::from_json_str(&json)?;
        log::info!(
            "Loaded snapshot {} with {} record(s)",
            path.display(),
            directory.records.values().map(Vec::len).sum::<usize>()
        );
        Ok(directory)
    }

    pub fn len(&self, entity: Entity) -> usize {
        self.records.get(&entity).map_or(0, Vec::len)
    }

    pub fn queries(&self) -> Vec<(Entity, Filter)> {
        self.queries.borrow().clone()
    }
}

impl Directory for InMemoryDirectory {
    fn fetch(&self, entity: Entity, filter: &Filter) -> Result<Vec<Value>> {
        self.queries.borrow_mut().push((entity, filter.clone()));
        let matched: Vec<Value> = self
            .records
            .get(&entity)
            .into_iter()
            .flatten()
            .filter(|record| {
                filter.conditions().iter().all(|(field, predicate)| {
                    field_text(record, field).is_some_and(|text| predicate.matches(&text))
                })
            })
            .cloned()
            .collect();
        log::trace!("snapshot {entity}?{filter} -> {} record(s)", matched.len());
        Ok(matched)
    }
}

/// Textual form of a scalar field, `None` for missing, null or nested values.
fn field_text(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> InMemoryDirectory {
        InMemoryDirectory::from_value(json!({
            "ixpfx": [
                {"id": 1, "ixlan_id": 10, "protocol": "IPv4", "prefix": "198.51.100.0/24"},
                {"id": 2, "ixlan_id": 11, "protocol": "IPv4", "prefix": "203.0.113.0/24"},
                {"id": 3, "ixlan_id": 12, "protocol": "IPv6", "prefix": "2001:db8:1::/64"}
            ]
        }))
        .expect("Error building snapshot")
    }

    #[test]
    fn test_fetch_starts_with() {
        let dir = sample();
        let found = dir
            .fetch(Entity::IxPfx, &Filter::new().starts_with("prefix", "198.51"))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["id"], 1);
    }

    #[test]
    fn test_fetch_numeric_eq_and_in() {
        let dir = sample();
        let found = dir
            .fetch(Entity::IxPfx, &Filter::new().eq("ixlan_id", 11))
            .unwrap();
        assert_eq!(found.len(), 1);

        let found = dir
            .fetch(Entity::IxPfx, &Filter::new().one_of("id", [3, 1]))
            .unwrap();
        // snapshot order, not filter order
        assert_eq!(found[0]["id"], 1);
        assert_eq!(found[1]["id"], 3);
    }

    #[test]
    fn test_fetch_unknown_entity_is_empty() {
        let dir = sample();
        assert!(dir.fetch(Entity::Org, &Filter::new()).unwrap().is_empty());
    }

    #[test]
    fn test_fetch_missing_field_never_matches() {
        let dir = sample();
        let found = dir
            .fetch(Entity::IxPfx, &Filter::new().eq("notes", ""))
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_queries_recorded() {
        let dir = sample();
        let filter = Filter::new().eq("id", 2);
        dir.fetch(Entity::IxPfx, &filter).unwrap();
        assert_eq!(dir.queries(), vec![(Entity::IxPfx, filter)]);
    }

    #[test]
    fn test_invalid_snapshot() {
        assert!(matches!(
            InMemoryDirectory::from_json_str(r#"{"bogus": []}"#),
            Err(PdbError::Snapshot(_))
        ));
        assert!(InMemoryDirectory::from_json_str("not json").is_err());
    }
}
