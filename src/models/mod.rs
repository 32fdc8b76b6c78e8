//! Domain models for the peering directory.
//!
//! This module contains the record shapes and address helpers used throughout the crate:
//! - [`normalize`] and [`coarse_key`] - textual address canonicalization
//! - [`Prefix`] - CIDR block advertised at an exchange-lan
//! - [`ExchangeLan`] and [`ExchangePoint`] - exchange structure
//! - [`Organization`], [`Network`] and [`Attachment`] - who is present where

mod address;
mod exchange;
mod network;
mod prefix;

// Re-export public types
pub use address::{coarse_key, coarse_key_for, normalize, parse_address, AddressFamily};
pub use exchange::{ExchangeLan, ExchangePoint};
pub use network::{Attachment, Network, Organization};
pub use prefix::Prefix;
