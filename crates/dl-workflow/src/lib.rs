//! `dl-workflow` — the workflow sheet: driver blocks, deliveries and the
//! run's restaurant arena.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`columns`]   | Column names and per-layout required sets                |
//! | [`model`]     | `Driver`, `Pickup`, `Delivery`, `Restaurant`, results    |
//! | [`parser`]    | `WorkflowSheet` and the driver-block state machine       |
//! | [`reconcile`] | Pickup order reconciliation, restaurant arena            |
//! | [`error`]     | `WorkflowError`, `RowErrors`, `OrderMismatch`            |
//!
//! # Quick start
//!
//! ```ignore
//! let catalog = dl_restaurants::parse_catalog(template_csv)?;
//! let model = dl_workflow::parse_workflow(workflow_csv, &catalog)?;
//! for driver in &model.drivers {
//!     println!("{}: {} pickups", driver.user_name, driver.pickups.len());
//! }
//! ```

pub mod columns;
pub mod error;
pub mod model;
pub mod parser;
pub mod reconcile;


use dl_core::{Row, parse_rows};
use dl_restaurants::RestaurantCatalog;

pub use error::{OrderMismatch, RowErrors, WorkflowError, WorkflowResult};
pub use model::{
    Delivery, Driver, Pickup, RationLayout, Rations, RequestMode, Restaurant, RouteRequest,
    WorkflowModel,
};
pub use parser::WorkflowSheet;

/// Parse a routed workflow sheet.
pub fn parse_workflow(text: &str, catalog: &RestaurantCatalog) -> WorkflowResult<WorkflowModel> {
    parse_workflow_rows(&parse_rows(text)?, catalog)
}

/// [`parse_workflow`] over already tokenized rows.
pub fn parse_workflow_rows(rows: &[Row], catalog: &RestaurantCatalog) -> WorkflowResult<WorkflowModel> {
    let sheet = WorkflowSheet::new(rows)?;
    let control_block = sheet.control_block()?;
    let drivers = sheet.driver_blocks()?;
    sheet.assemble(control_block, drivers, catalog)
}

/// Parse an unrouted (route request) sheet.
pub fn parse_route_request(text: &str) -> WorkflowResult<RouteRequest> {
    parse_route_request_rows(&parse_rows(text)?)
}

pub fn parse_route_request_rows(rows: &[Row]) -> WorkflowResult<RouteRequest> {
    let sheet = WorkflowSheet::new(rows)?;
    let control_block = sheet.control_block()?;
    let (deliveries, drivers) = sheet.route_request_rows()?;
    sheet.assemble_route_request(control_block, deliveries, drivers)
}
