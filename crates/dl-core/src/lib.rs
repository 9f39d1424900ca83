//! `dl-core` — foundational types for the delivery-logistics workspace.
//!
//! Every other `dl-*` crate depends on this one.  It has no `dl-*`
//! dependencies and keeps external ones minimal (`csv`, `thiserror`,
//! `tracing`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`time`]    | `ClockTime` (wall-clock minute of day, 5-minute grid)    |
//! | [`rows`]    | `Row`, `HeaderMap`, `parse_rows`, `write_rows`           |
//! | [`roster`]  | `Member`, `MemberRoster` (consumed collaborator)         |
//! | [`version`] | `parse_version` (`2-0-0` / `300` labels)                 |
//! | [`error`]   | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod roster;
pub mod rows;
pub mod time;
pub mod version;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use roster::{DRIVERS_GROUP, Member, MemberRoster};
pub use rows::{HeaderMap, Row, parse_rows, write_rows};
pub use time::{ClockTime, GRID_MINUTES};
pub use version::parse_version;
