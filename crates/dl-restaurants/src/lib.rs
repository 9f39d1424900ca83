//! `dl-restaurants` — restaurant template parsing and the restaurant catalog.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`master`]  | `RestaurantMaster`, `RestaurantCatalog`, `TemplateVersion`  |
//! | [`parser`]  | `parse_catalog`, `load_catalog_csv`, `load_catalog_reader`  |
//! | [`error`]   | `CatalogError`, `CatalogResult<T>`                          |
//!
//! The catalog is parsed once per run and is immutable afterwards.  Run-time
//! restaurant visits refer to catalog entries by name; nothing copies a
//! `RestaurantMaster`.

pub mod error;
pub mod master;
pub mod parser;

#[cfg(test)]
mod tests;

pub use error::{CatalogError, CatalogResult};
pub use master::{RestaurantCatalog, RestaurantMaster, TemplateVersion};
pub use parser::{load_catalog_csv, load_catalog_reader, parse_catalog, parse_catalog_rows};
