//! CSV row tokenizer and header-based cell access.
//!
//! # Format
//!
//! Documents are spreadsheet exports: UTF-8, comma-delimited, RFC-4180
//! quoting.  Line endings may be `\n`, `\r`, `\r\n`, or a mix of them; the
//! `csv` crate's default terminator already treats all three as one record
//! break.  Quoted fields may contain commas, doubled quotes, and newlines.
//!
//! Completely empty source lines carry no record and are skipped by the
//! reader.  A spreadsheet's "blank" row is exported as `,,,,` and *is* kept
//! as a [`Row`] whose cells are all empty (see [`Row::is_empty`]).
//!
//! # Line numbers
//!
//! Every [`Row`] carries the 1-based source line it started on so error
//! messages can point operators at the offending spreadsheet row.  The
//! reader's own line counter only sees `\n`, so lines are counted from the
//! record's byte offset instead: `\r\n`, `\r`, and `\n` are one break each,
//! including breaks inside quoted fields.

use std::collections::HashMap;

use tracing::debug;

use crate::{CoreError, CoreResult};

// ── Row ───────────────────────────────────────────────────────────────────────

/// One tokenized CSV record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    /// 1-based source line of the first character of the record.
    pub line:  usize,
    pub cells: Vec<String>,
}

impl Row {
    pub fn new(line: usize, cells: Vec<String>) -> Self {
        Self { line, cells }
    }

    /// Cell `index`, or `""` if the record is shorter.
    #[inline]
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    /// `true` when every cell is blank after trimming.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }
}

// ── Tokenize / emit ───────────────────────────────────────────────────────────

/// Tokenize `text` into ordered rows.
pub fn parse_rows(text: &str) -> CoreResult<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut lines = LineCursor::new(text.as_bytes());
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = match record.position() {
            Some(pos) => lines.line_at(pos.byte() as usize),
            None => lines.line,
        };
        rows.push(Row::new(line, record.iter().map(str::to_owned).collect()));
    }

    debug!(rows = rows.len(), "tokenized document");
    Ok(rows)
}

/// Forward-only byte offset to line number mapping.
struct LineCursor<'a> {
    bytes:  &'a [u8],
    offset: usize,
    line:   usize,
}

impl<'a> LineCursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0, line: 1 }
    }

    /// Line of the first record byte at or after `byte`.  The reader may
    /// report a record as starting on the terminator (or blank lines) before
    /// it, so those are skipped first.
    fn line_at(&mut self, byte: usize) -> usize {
        let mut start = byte.max(self.offset);
        while matches!(self.bytes.get(start), Some(b'\r' | b'\n')) {
            start += 1;
        }
        let start = start.min(self.bytes.len());
        for i in self.offset..start {
            match self.bytes[i] {
                b'\n' => self.line += 1,
                b'\r' if self.bytes.get(i + 1) != Some(&b'\n') => self.line += 1,
                _ => {}
            }
        }
        self.offset = start;
        self.line
    }
}

/// Emit `rows` as CSV text with `\n` terminators.
///
/// The inverse of [`parse_rows`]: re-parsing the output yields the same
/// cells.  Fields are quoted only when necessary; a record consisting of a
/// single empty field is quoted so it survives the round trip.
pub fn write_rows<R: AsRef<[String]>>(rows: &[R]) -> CoreResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in rows {
        writer.write_record(row.as_ref())?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Io(e.into_error()))?;

    // Input was &str throughout, so the output is valid UTF-8.
    String::from_utf8(bytes).map_err(|e| {
        CoreError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

// ── HeaderMap ─────────────────────────────────────────────────────────────────

/// Column-name → index lookup built from a header row.
///
/// Column names are matched exactly after trimming; column order does not
/// matter.
#[derive(Clone, Debug)]
pub struct HeaderMap {
    /// Line of the header row.
    pub line: usize,
    index:    HashMap<String, usize>,
}

impl HeaderMap {
    pub fn from_row(row: &Row) -> Self {
        let mut index = HashMap::with_capacity(row.len());
        for (i, name) in row.cells.iter().enumerate() {
            // First occurrence wins for duplicated column names.
            index.entry(name.trim().to_owned()).or_insert(i);
        }
        Self { line: row.line, index }
    }

    /// Structural validation.
    ///
    /// A header that contains none of `required` is rejected as
    /// [`CoreError::NotAHeader`]; otherwise every absent column is reported
    /// together in one [`CoreError::MissingColumns`].
    pub fn require(&self, required: &[&str]) -> CoreResult<()> {
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|name| !self.index.contains_key(*name))
            .collect();

        if missing.is_empty() {
            return Ok(());
        }
        if missing.len() == required.len() {
            return Err(CoreError::NotAHeader { line: self.line });
        }
        Err(CoreError::MissingColumns {
            line:    self.line,
            columns: missing.join(", "),
        })
    }

    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    /// Trimmed cell of `row` under `column`; `""` if the column is unknown.
    pub fn get<'r>(&self, row: &'r Row, column: &str) -> &'r str {
        self.index_of(column).map(|i| row.cell(i).trim()).unwrap_or("")
    }

    /// Boolean cell: `TRUE` / `FALSE`, case-insensitive.  A blank cell is
    /// `false`.
    pub fn get_bool(&self, row: &Row, column: &str) -> CoreResult<bool> {
        let value = self.get(row, column);
        if value.is_empty() || value.eq_ignore_ascii_case("FALSE") {
            Ok(false)
        } else if value.eq_ignore_ascii_case("TRUE") {
            Ok(true)
        } else {
            Err(CoreError::InvalidBool {
                column: column.to_owned(),
                value:  value.to_owned(),
                line:   row.line,
            })
        }
    }
}
