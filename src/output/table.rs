//! Two-column text report.
//!
//! ```text
//! Found 2 duplicate files.
//! File        Matched to
//! a/copy.txt  a/orig.txt
//! b/orig.txt  a/orig.txt
//! ```

use std::io::{self, Write};

use tabled::settings::object::{Columns, Rows};
use tabled::settings::{Color, Padding, Style, Width};
use tabled::{Table, Tabled};

use crate::duplicates::DuplicateRecord;

const COLUMN_GAP: usize = 2;

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Matched to")]
    matched_to: String,
}

impl From<&DuplicateRecord> for Row {
    fn from(record: &DuplicateRecord) -> Self {
        Self {
            file: record.duplicate.display().to_string(),
            matched_to: record.original.display().to_string(),
        }
    }
}

/// Renders duplicate records as an aligned table.
#[derive(Debug, Clone, Copy)]
pub struct TableOutput<'a> {
    records: &'a [DuplicateRecord],
    color: bool,
    max_width: Option<usize>,
}

impl<'a> TableOutput<'a> {
    /// Create a plain table over `records`.
    #[must_use]
    pub fn new(records: &'a [DuplicateRecord]) -> Self {
        Self {
            records,
            color: false,
            max_width: None,
        }
    }

    /// Style the header (italic, underlined).
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Wrap cells so no line is wider than `width` columns.
    #[must_use]
    pub fn with_max_width(mut self, width: Option<usize>) -> Self {
        self.max_width = width;
        self
    }

    /// Write the headline and, when there are duplicates, the table.
    ///
    /// # Errors
    ///
    /// Propagates write errors.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if self.records.is_empty() {
            return writeln!(writer, "No duplicate files found.");
        }

        writeln!(writer, "Found {} duplicate files.", self.records.len())?;
        writeln!(writer, "{}", self.build())
    }

    fn build(&self) -> Table {
        let mut table = Table::new(self.records.iter().map(Row::from));
        table.with(Style::empty());
        table.modify(Columns::first(), Padding::new(0, COLUMN_GAP, 0, 0));
        table.modify(Columns::last(), Padding::zero());

        if self.color {
            let header = yansi::Style::new().italic().underline();
            let (prefix, suffix) = (header.prefix(), header.suffix());
            table.modify(Rows::first(), Color::new(prefix.as_ref(), suffix.as_ref()));
        }
        if let Some(width) = self.max_width {
            table.with(Width::wrap(width));
        }
        table
    }
}
