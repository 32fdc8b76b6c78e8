//! Error types for directory queries and lookups.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PdbError>;

/// Errors surfaced by the directory client and the lookup logic.
///
/// "Nothing found" is never an error here: lookups return `Ok(None)` or an
/// empty collection for that.
#[derive(Error, Debug)]
pub enum PdbError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Directory returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Error decoding {entity} records: path={path} error={message}")]
    Decode {
        entity: String,
        path: String,
        message: String,
    },

    #[error("Invalid notes pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("No network found for ASN {0}")]
    UnknownAsn(u32),

    #[error("No IXPs found for ASN {0}")]
    NoNetworks(u32),
}
