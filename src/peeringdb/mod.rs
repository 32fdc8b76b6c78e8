//! Peering directory access.
//!
//! This module handles all directory queries:
//! - [`query`] - Filters, entity names and the [`Directory`] trait
//! - [`client`] - HTTP client for the live API
//! - [`memory`] - In-memory directory loaded from a JSON snapshot

mod client;
mod memory;
mod query;

// Re-export public types and functions
pub use client::PeeringDbClient;
pub use memory::InMemoryDirectory;
pub use query::{fetch_first, fetch_records, Directory, Entity, Filter, Predicate};
