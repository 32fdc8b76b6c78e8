//! Directory query vocabulary and the [`Directory`] capability.

use crate::error::{PdbError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Entity collections exposed by the directory.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Org,
    Net,
    Ix,
    IxLan,
    IxPfx,
    NetIxLan,
}

impl Entity {
    /// Path segment / snapshot key of the collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Org => "org",
            Entity::Net => "net",
            Entity::Ix => "ix",
            Entity::IxLan => "ixlan",
            Entity::IxPfx => "ixpfx",
            Entity::NetIxLan => "netixlan",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condition applied to a single record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Equals(String),
    StartsWith(String),
    In(Vec<String>),
}

impl Predicate {
    /// Query parameter suffix understood by the directory API.
    fn suffix(&self) -> &'static str {
        match self {
            Predicate::Equals(_) => "",
            Predicate::StartsWith(_) => "__startswith",
            Predicate::In(_) => "__in",
        }
    }

    fn query_value(&self) -> String {
        match self {
            Predicate::Equals(v) | Predicate::StartsWith(v) => v.clone(),
            Predicate::In(values) => values.join(","),
        }
    }

    /// Evaluate the predicate against the textual value of a field.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Predicate::Equals(v) => value == v,
            Predicate::StartsWith(v) => value.starts_with(v.as_str()),
            Predicate::In(values) => values.iter().any(|v| v == value),
        }
    }
}

/// Conjunction of field predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(String, Predicate)>,
}

impl Filter {
    pub fn new() -> Filter {
        Filter::default()
    }

    pub fn eq<T: ToString>(self, field: &str, value: T) -> Filter {
        self.with(field, Predicate::Equals(value.to_string()))
    }

    pub fn starts_with(self, field: &str, value: &str) -> Filter {
        self.with(field, Predicate::StartsWith(value.to_string()))
    }

    pub fn one_of<I, T>(self, field: &str, values: I) -> Filter
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect();
        self.with(field, Predicate::In(values))
    }

    pub fn with(mut self, field: &str, predicate: Predicate) -> Filter {
        self.conditions.push((field.to_string(), predicate));
        self
    }

    pub fn conditions(&self) -> &[(String, Predicate)] {
        &self.conditions
    }

    /// Render as API query parameters, e.g. `("prefix__startswith", "198.51")`.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.conditions
            .iter()
            .map(|(field, p)| (format!("{field}{}", p.suffix()), p.query_value()))
            .collect()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        f.write_str(&pairs.join("&"))
    }
}

/// Read-only access to the directory: filter in, records out.
///
/// Implementations must return every record matching the filter. Order is
/// whatever the backend yields. An empty result is a normal outcome.
pub trait Directory {
    fn fetch(&self, entity: Entity, filter: &Filter) -> Result<Vec<Value>>;
}

/// Fetch and decode records of one entity type.
pub fn fetch_records<T, D>(directory: &D, entity: Entity, filter: &Filter) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    D: Directory + ?Sized,
{
    directory
        .fetch(entity, filter)?
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            serde_path_to_error::deserialize(value).map_err(|e| PdbError::Decode {
                entity: entity.to_string(),
                path: format!("[{i}].{}", e.path()),
                message: e.inner().to_string(),
            })
        })
        .collect()
}

/// First record matching the filter, if any.
pub fn fetch_first<T, D>(directory: &D, entity: Entity, filter: &Filter) -> Result<Option<T>>
where
    T: DeserializeOwned,
    D: Directory + ?Sized,
{
    Ok(fetch_records(directory, entity, filter)?.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs() {
        let filter = Filter::new()
            .starts_with("prefix", "198.51")
            .eq("ixlan_id", 10)
            .one_of("asn", [64500, 64501]);
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("prefix__startswith".to_string(), "198.51".to_string()),
                ("ixlan_id".to_string(), "10".to_string()),
                ("asn__in".to_string(), "64500,64501".to_string()),
            ]
        );
        assert_eq!(
            filter.to_string(),
            "prefix__startswith=198.51&ixlan_id=10&asn__in=64500,64501"
        );
    }

    #[test]
    fn test_predicate_matches() {
        assert!(Predicate::Equals("10".into()).matches("10"));
        assert!(!Predicate::Equals("10".into()).matches("100"));
        assert!(Predicate::StartsWith("2001:7f8".into()).matches("2001:7f8::/64"));
        assert!(Predicate::In(vec!["1".into(), "2".into()]).matches("2"));
        assert!(!Predicate::In(vec![]).matches("2"));
    }

    #[test]
    fn test_entity_names() {
        assert_eq!(Entity::NetIxLan.to_string(), "netixlan");
        let parsed: Entity = serde_json::from_str("\"ixpfx\"").unwrap();
        assert_eq!(parsed, Entity::IxPfx);
    }
}
