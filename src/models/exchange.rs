//! Exchange point (`ix`) and exchange-lan (`ixlan`) records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A subnet-scoped segment of an exchange point.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExchangeLan {
    pub id: u32,
    /// Parent exchange point.
    pub ix_id: u32,
    #[serde(default)]
    pub name: String,
}

/// An internet exchange point.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExchangePoint {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub name_long: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub website: Option<String>,
    /// Last modification time of the record in the directory.
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

impl fmt::Display for ExchangePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ix {})", self.name, self.id)?;
        if !self.name_long.is_empty() && self.name_long != self.name {
            write!(f, " \"{}\"", self.name_long)?;
        }
        if !self.city.is_empty() {
            write!(f, ", {}", self.city)?;
        }
        if !self.country.is_empty() {
            write!(f, ", {}", self.country)?;
        }
        if let Some(updated) = self.updated {
            write!(f, " [updated {}]", updated.format("%Y-%m-%d"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_point_from_json() {
        let json = r#"{
            "id": 26,
            "org_id": 2,
            "name": "AMS-IX",
            "name_long": "Amsterdam Internet Exchange",
            "city": "Amsterdam",
            "country": "NL",
            "website": "https://www.ams-ix.net/",
            "updated": "2024-03-01T10:20:30Z",
            "status": "ok"
        }"#;
        let ix: ExchangePoint = serde_json::from_str(json).expect("Error parsing ix");
        assert_eq!(ix.id, 26);
        assert_eq!(ix.name, "AMS-IX");
        assert_eq!(
            ix.to_string(),
            "AMS-IX (ix 26) \"Amsterdam Internet Exchange\", Amsterdam, NL [updated 2024-03-01]"
        );
    }

    #[test]
    fn test_exchange_point_minimal() {
        let ix: ExchangePoint =
            serde_json::from_str(r#"{"id": 7, "name": "TinyIX"}"#).expect("Error parsing ix");
        assert_eq!(ix.to_string(), "TinyIX (ix 7)");
        assert!(ix.updated.is_none());
    }
}
