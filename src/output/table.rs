//! Terminal table output.

use super::{sorted_rows, ReportHeader, ReportSink};
use crate::processing::MergedRow;
use std::io::Write;
use tabled::builder::Builder;
use tabled::settings::object::Segment;
use tabled::settings::{Alignment, Modify, Style};

/// Writes a bordered, left-aligned table with a rule after every row.
pub struct TableSink<W: Write> {
    out: W,
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W) -> TableSink<W> {
        TableSink { out }
    }
}

impl<W: Write> ReportSink for TableSink<W> {
    fn emit(&mut self, header: &ReportHeader, rows: &[MergedRow]) -> std::io::Result<()> {
        log::debug!("TableSink: {} row(s)", rows.len());
        writeln!(self.out, "{}", render_table(header, rows))?;
        self.out.flush()
    }
}

/// Render the table as text. Cells may span several lines.
pub fn render_table(header: &ReportHeader, rows: &[MergedRow]) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        header.exchange.clone(),
        header.side_a.clone(),
        header.side_b.clone(),
    ]);
    for row in sorted_rows(rows) {
        builder.push_record([row.exchange.clone(), row.side_a_text(), row.side_b_text()]);
    }

    builder
        .build()
        .with(Style::ascii())
        .with(Modify::new(Segment::all()).with(Alignment::left()))
        .to_string()
}
