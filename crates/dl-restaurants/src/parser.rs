//! Restaurant template parser.
//!
//! # CSV format
//!
//! ```csv
//! Version,3-0-0
//! Route,Name,Start Time,Emoji,No Pics
//! TRUE,Solano Route,,,
//! FALSE,Cafe Raj,5:00 PM,:curry:,FALSE
//! ,,,,
//! FALSE,V&A Cafe,4:50 PM,:coffee:,TRUE
//! TRUE,Shattuck Route,,,
//! FALSE,Jot Mahal,5:00 PM,:naan:,FALSE
//! ```
//!
//! - The first non-empty row is the `Version` row; it gates which optional
//!   columns the header must carry (see [`crate::master`]).
//! - The next non-empty row is the header.  Column order is free.
//! - `Route = TRUE` opens a route block named by `Name`.  Every following
//!   restaurant row (`Route = FALSE`) belongs to that route until the next
//!   marker.
//! - Empty rows anywhere after the header are skipped.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use dl_core::{ClockTime, GRID_MINUTES, HeaderMap, Row, parse_rows, parse_version};

use crate::master::{RestaurantCatalog, RestaurantMaster, TemplateVersion};
use crate::{CatalogError, CatalogResult};

// ── Column names ──────────────────────────────────────────────────────────────

pub const VERSION: &str = "Version";
pub const ROUTE: &str = "Route";
pub const NAME: &str = "Name";
pub const START_TIME: &str = "Start Time";
pub const EMOJI: &str = "Emoji";
pub const NO_PICS: &str = "No Pics";

fn required_columns(version: TemplateVersion) -> Vec<&'static str> {
    let mut columns = vec![ROUTE, NAME, START_TIME];
    if version.has_emoji() {
        columns.push(EMOJI);
    }
    if version.has_no_pics() {
        columns.push(NO_PICS);
    }
    columns
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a catalog from a template file on disk.
pub fn load_catalog_csv(path: &Path) -> CatalogResult<RestaurantCatalog> {
    let file = std::fs::File::open(path)?;
    load_catalog_reader(file)
}

/// Like [`load_catalog_csv`] but accepts any `Read` source.
pub fn load_catalog_reader<R: Read>(mut reader: R) -> CatalogResult<RestaurantCatalog> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_catalog(&text)
}

/// Tokenize and parse template `text`.
pub fn parse_catalog(text: &str) -> CatalogResult<RestaurantCatalog> {
    let rows = parse_rows(text)?;
    parse_catalog_rows(&rows)
}

/// Parse an already tokenized template.
pub fn parse_catalog_rows(rows: &[Row]) -> CatalogResult<RestaurantCatalog> {
    let mut rows = rows.iter().filter(|r| !r.is_empty());

    // ── Version row ───────────────────────────────────────────────────────
    let version_row = rows.next().ok_or(CatalogError::MissingVersion {
        found: String::new(),
        line:  1,
    })?;
    let version = parse_version_row(version_row)?;

    // ── Header ────────────────────────────────────────────────────────────
    let header_row = rows.next().ok_or(CatalogError::MissingHeader)?;
    let header = HeaderMap::from_row(header_row);
    header.require(&required_columns(version))?;

    // ── Route blocks ──────────────────────────────────────────────────────
    let mut catalog = RestaurantCatalog::new(version);
    let mut route: Option<String> = None;

    for row in rows {
        let name = header.get(row, NAME);

        if header.get_bool(row, ROUTE)? {
            if name.is_empty() {
                return Err(CatalogError::MissingRouteName { line: row.line });
            }
            debug!(route = name, line = row.line, "route block");
            catalog.add_route(name.to_owned());
            route = Some(name.to_owned());
            continue;
        }

        if name.is_empty() {
            return Err(CatalogError::EmptyName { line: row.line });
        }
        let Some(route) = route.as_ref() else {
            return Err(CatalogError::OutsideRoute { name: name.to_owned(), line: row.line });
        };

        let restaurant = RestaurantMaster {
            name:       name.to_owned(),
            route:      route.clone(),
            start_time: parse_start_time(&header, row, name)?,
            emoji:      header.get(row, EMOJI).to_owned(),
            no_pics:    version.has_no_pics() && header.get_bool(row, NO_PICS)?,
            line:       row.line,
        };

        catalog.insert(restaurant).map_err(|first_line| CatalogError::Duplicate {
            name: name.to_owned(),
            line: row.line,
            first_line,
        })?;
    }

    debug!(
        restaurants = catalog.len(),
        routes = catalog.routes().len(),
        "parsed restaurant template"
    );
    Ok(catalog)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_version_row(row: &Row) -> CatalogResult<TemplateVersion> {
    if row.cell(0).trim() != VERSION {
        return Err(CatalogError::MissingVersion {
            found: row.cell(0).trim().to_owned(),
            line:  row.line,
        });
    }
    let value = row.cell(1).trim();
    parse_version(value)
        .and_then(TemplateVersion::from_number)
        .ok_or_else(|| CatalogError::UnsupportedVersion {
            value: value.to_owned(),
            line:  row.line,
        })
}

fn parse_start_time(header: &HeaderMap, row: &Row, name: &str) -> CatalogResult<ClockTime> {
    let value = header.get(row, START_TIME);
    let time: ClockTime = value.parse().map_err(|_| CatalogError::InvalidStartTime {
        name:  name.to_owned(),
        value: value.to_owned(),
        line:  row.line,
    })?;

    if !time.is_on_grid(GRID_MINUTES) {
        return Err(CatalogError::OffGrid {
            name:  name.to_owned(),
            value: time.to_string(),
            grid:  GRID_MINUTES,
            line:  row.line,
        });
    }
    Ok(time)
}
