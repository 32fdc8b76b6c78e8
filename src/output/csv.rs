//! CSV output, one line per shared exchange-lan.

use super::{sorted_rows, ReportHeader, ReportSink};
use crate::processing::MergedRow;
use itertools::Itertools;
use std::io::Write;

pub struct CsvSink<W: Write> {
    out: W,
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> CsvSink<W> {
        CsvSink { out }
    }
}

impl<W: Write> ReportSink for CsvSink<W> {
    fn emit(&mut self, header: &ReportHeader, rows: &[MergedRow]) -> std::io::Result<()> {
        log::debug!("CsvSink: {} row(s)", rows.len());
        writeln!(
            self.out,
            "{},{},{}",
            escape_csv_field(&header.exchange),
            escape_csv_field(&header.side_a),
            escape_csv_field(&header.side_b)
        )?;
        for row in sorted_rows(rows) {
            writeln!(
                self.out,
                "{},{},{}",
                escape_csv_field(&row.exchange),
                escape_csv_field(&row.side_a.iter().map(|e| e.compact()).join("; ")),
                escape_csv_field(&row.side_b.iter().map(|e| e.compact()).join("; "))
            )?;
        }
        self.out.flush()
    }
}

/// Quote a field when it contains a comma, quote or line break.
pub fn escape_csv_field(input: &str) -> String {
    if input.contains([',', '"', '\n', '\r']) {
        // excel does not like spaces after comma between fields
        let escaped = input.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        input.to_string()
    }
}
