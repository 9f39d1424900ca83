//! `dl-control` — the control block: a small versioned configuration
//! language embedded in the workflow spreadsheet.
//!
//! # Lifecycle
//!
//! ```text
//! rows ──find_control_block──► span ──parse_span──► ControlBlock ──audit(ctx)──► warnings
//!                                        │
//!                              grammar_for(Version)
//! ```
//!
//! Parsing is syntactic and needs nothing but the rows.  [`ControlBlock::audit`]
//! needs the member roster and the drivers of the run, so it runs after the
//! driver blocks are parsed.
//!
//! # Versions
//!
//! | Version | Adds                                                      |
//! |---------|-----------------------------------------------------------|
//! | `1`     | OpsManager, SplitRestaurant, BackupDriverUserName          |
//! | `2-0-0` | Restaurant emoji, three audit toggles                      |
//! | `3-0-0` | FoodSources, StartTimes, Alt*Options, PickupManager        |

pub mod audit;
pub mod block;
pub mod columns;
pub mod directive;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod version;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use audit::AuditContext;
pub use block::{
    AuditToggle, BackupDriver, ControlBlock, FoodSources, OpsManager, OptionList, PickupManager,
    Placeholder, RestaurantEmoji, SplitRestaurant, StartTimes, V300Fields,
};
pub use directive::{RawDirective, is_placeholder};
pub use error::{ControlBlockError, ControlResult};
pub use grammar::{Applied, DirectiveGrammar, grammar_for};
pub use parser::{ControlBlockSpan, find_control_block, parse_control_block, parse_span};
pub use version::{CONTROL_BLOCK_CURRENT_VERSION, ControlBlockVersion};
