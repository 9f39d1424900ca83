//! Locate the control block in a workflow sheet and parse its directives.
//!
//! ```text
//! Consumer  Driver  Name                         User Name
//! FALSE     FALSE   ControlBegin
//! FALSE     FALSE   Version                      3-0-0
//! FALSE     FALSE   OpsManager (UserName|Phone)  jbOpsMgr | 510-555-1212
//! FALSE     FALSE   ControlEnd
//! ```
//!
//! Parsing happens in two passes over the block interior: the first pass
//! finds the `Version` row (wherever it sits), the second feeds every other
//! row to that version's [`DirectiveGrammar`](crate::DirectiveGrammar).

use dl_core::{HeaderMap, Row};
use tracing::{debug, warn};

use crate::columns::{CONSUMER, DRIVER, NAME, USER_NAME};
use crate::directive::{self, RawDirective};
use crate::grammar::{Applied, grammar_for};
use crate::{ControlBlock, ControlBlockError, ControlBlockVersion, ControlResult};

/// Row indices of the `ControlBegin` and `ControlEnd` markers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ControlBlockSpan {
    pub begin: usize,
    pub end:   usize,
}

impl ControlBlockSpan {
    /// `true` if row index `i` is a marker or interior row.
    pub fn contains(&self, i: usize) -> bool {
        (self.begin..=self.end).contains(&i)
    }
}

/// Find the single control block in `rows`.
///
/// Errors on an unmatched marker, a second block, or a block row whose
/// `Consumer` or `Driver` flag is set.
pub fn find_control_block(rows: &[Row], header: &HeaderMap) -> ControlResult<Option<ControlBlockSpan>> {
    let mut found: Option<ControlBlockSpan> = None;
    let mut open: Option<usize> = None;

    for (i, row) in rows.iter().enumerate() {
        let name = header.get(row, NAME);
        match (name, open) {
            (directive::CONTROL_BEGIN, None) => {
                if let Some(first) = found {
                    return Err(ControlBlockError::SecondBlock {
                        line:       row.line,
                        first_line: rows[first.begin].line,
                    });
                }
                open = Some(i);
            }
            (directive::CONTROL_END, None) => {
                return Err(ControlBlockError::EndWithoutBegin { line: row.line });
            }
            (directive::CONTROL_END, Some(begin)) => {
                found = Some(ControlBlockSpan { begin, end: i });
                open = None;
            }
            _ => {}
        }
    }

    if let Some(begin) = open {
        return Err(ControlBlockError::Unterminated { line: rows[begin].line });
    }

    if let Some(span) = found {
        for row in &rows[span.begin..=span.end] {
            check_marker_flags(row, header)?;
        }
        debug!(begin = rows[span.begin].line, end = rows[span.end].line, "found control block");
    }
    Ok(found)
}

fn check_marker_flags(row: &Row, header: &HeaderMap) -> ControlResult<()> {
    for column in [CONSUMER, DRIVER] {
        if header.get_bool(row, column)? {
            return Err(ControlBlockError::MarkerFlags { column, line: row.line });
        }
    }
    Ok(())
}

/// Find and parse the control block in `rows`.  `Ok(None)` when the sheet
/// has none.
pub fn parse_control_block(rows: &[Row], header: &HeaderMap) -> ControlResult<Option<ControlBlock>> {
    let Some(span) = find_control_block(rows, header)? else {
        return Ok(None);
    };
    parse_span(rows, header, span).map(Some)
}

/// Parse the directives of an already located block.
pub fn parse_span(rows: &[Row], header: &HeaderMap, span: ControlBlockSpan) -> ControlResult<ControlBlock> {
    let interior = &rows[span.begin + 1..span.end];
    let directives: Vec<RawDirective<'_>> = interior
        .iter()
        .map(|row| RawDirective {
            key:   header.get(row, NAME),
            value: header.get(row, USER_NAME),
            line:  row.line,
        })
        .collect();

    let version = block_version(&directives)?;
    let mut block = ControlBlock::new(version, rows[span.begin].line);
    let grammar = grammar_for(version);

    for d in &directives {
        if d.key.is_empty() && d.value.is_empty() {
            continue;
        }
        if d.key == directive::VERSION {
            continue;
        }
        if d.key.starts_with(directive::MARKER_PREFIX) {
            return Err(ControlBlockError::UnexpectedDirective {
                directive: d.key.to_owned(),
                line:      d.line,
            });
        }
        if d.key.is_empty() {
            push_warning(&mut block, format!("Value \"{}\" without a key at line {}", d.value, d.line));
            continue;
        }
        if grammar.apply(&mut block, d)? == Applied::Unknown {
            push_warning(&mut block, format!("Unknown key \"{}\" at line {}", d.key, d.line));
        }
    }

    debug!(
        version = %block.version,
        grammar = %grammar.version(),
        warnings = block.warnings.len(),
        placeholders = block.placeholders.len(),
        "parsed control block"
    );
    Ok(block)
}

fn block_version(directives: &[RawDirective<'_>]) -> ControlResult<ControlBlockVersion> {
    let mut version: Option<&RawDirective<'_>> = None;
    for d in directives.iter().filter(|d| d.key == directive::VERSION) {
        if let Some(first) = version {
            return Err(ControlBlockError::DuplicateVersion { line: d.line, first_line: first.line });
        }
        version = Some(d);
    }

    match version {
        None => Ok(ControlBlockVersion::Legacy),
        Some(d) => ControlBlockVersion::from_label(d.value).ok_or_else(|| ControlBlockError::InvalidVersion {
            value: d.value.to_owned(),
            line:  d.line,
        }),
    }
}

fn push_warning(block: &mut ControlBlock, message: String) {
    warn!("{message}");
    block.warnings.push(message);
}
