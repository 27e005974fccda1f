//! Plain-text table rendering
//!
//! Columns are aligned to their widest cell and separated by two spaces; the
//! last column is never padded. Output goes to any `io::Write` so renderers
//! can be tested against a buffer.

use std::io::{self, Write};

use serde_json::Value;

/// Spaces between columns
const COLUMN_GAP: usize = 2;

/// A table of rows with aligned columns
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table whose first row is `header`
    pub fn with_header<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        table.row(header);
        table
    }

    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        let widths = self.column_widths();
        for row in &self.rows {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                line.push_str(cell);
                if i + 1 < row.len() {
                    let pad = widths[i] - display_width(cell) + COLUMN_GAP;
                    line.extend(std::iter::repeat(' ').take(pad));
                }
            }
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = Vec::new();
        for row in &self.rows {
            // The last cell of a row does not affect alignment
            for (i, cell) in row.iter().enumerate().take(row.len().saturating_sub(1)) {
                let width = display_width(cell);
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(width),
                    None => {
                        widths.resize(i, 0);
                        widths.push(width);
                    }
                }
            }
        }
        widths
    }
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}

/// Writes `=== TITLE ===` section headers followed by `key:  value` rows
pub struct SectionWriter<'a, W: Write + ?Sized> {
    out: &'a mut W,
    table: Table,
}

impl<'a, W: Write + ?Sized> SectionWriter<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self {
            out,
            table: Table::new(),
        }
    }

    /// Flushes the pending rows and starts a new section
    pub fn title(&mut self, title: &str) -> io::Result<()> {
        self.flush()?;
        writeln!(self.out)?;
        writeln!(self.out, "=== {} ===", title.to_uppercase())
    }

    pub fn row(&mut self, key: &str, value: impl Into<String>) {
        self.table.row([format!("{}:", key), value.into()]);
    }

    pub fn flush(&mut self) -> io::Result<()> {
        if !self.table.is_empty() {
            self.table.write_to(&mut *self.out)?;
            self.table = Table::new();
        }
        Ok(())
    }
}

/// Pretty-prints a JSON document with two-space indentation.
///
/// Bytes that are not valid JSON are written through unchanged.
pub fn print_json<W: Write + ?Sized>(out: &mut W, bytes: &[u8]) -> io::Result<()> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value) => print_json_value(out, &value),
        Err(_) => {
            out.write_all(bytes)?;
            writeln!(out)
        }
    }
}

pub fn print_json_value<W: Write + ?Sized>(out: &mut W, value: &Value) -> io::Result<()> {
    let pretty = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
    writeln!(out, "{}", pretty)
}
