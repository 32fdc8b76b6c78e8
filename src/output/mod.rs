//! Report output.
//!
//! This module handles rendering intersection reports:
//! - [`table`] - Bordered text table for the terminal
//! - [`csv`] - CSV lines

mod csv;
mod table;

pub use csv::{escape_csv_field, CsvSink};
pub use table::{render_table, TableSink};

use crate::processing::MergedRow;
use itertools::Itertools;

/// Column labels of a report: exchange, side A, side B.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub exchange: String,
    pub side_a: String,
    pub side_b: String,
}

impl ReportHeader {
    pub fn new(exchange: &str, side_a: &str, side_b: &str) -> ReportHeader {
        ReportHeader {
            exchange: exchange.to_string(),
            side_a: side_a.to_string(),
            side_b: side_b.to_string(),
        }
    }
}

/// Destination for correlated rows. Ordering and formatting are up to the sink.
pub trait ReportSink {
    fn emit(&mut self, header: &ReportHeader, rows: &[MergedRow]) -> std::io::Result<()>;
}

/// Rows ordered by exchange name, then exchange-lan id.
pub(crate) fn sorted_rows(rows: &[MergedRow]) -> Vec<&MergedRow> {
    rows.iter()
        .sorted_by(|a, b| {
            a.exchange
                .cmp(&b.exchange)
                .then_with(|| a.ixlan_id.cmp(&b.ixlan_id))
        })
        .collect()
}
