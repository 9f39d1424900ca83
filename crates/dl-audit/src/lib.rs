//! `dl-audit` — whole-run audits, run after scheduling.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`rules`]   | `AuditRule` trait and the standard rules                   |
//! | [`auditor`] | `Auditor` (ordered rule list), `audit_run`                 |
//! | [`report`]  | `AuditReport`                                              |
//! | [`error`]   | `AuditError`, `AuditResult<T>`                             |
//!
//! # Toggles
//!
//! | Directive               | Disables                                   |
//! |-------------------------|--------------------------------------------|
//! | `SplitRestaurantAudits` | split-restaurant entry and cleanup checks  |
//! | `RestaurantsAudit`      | missing restaurant emoji warnings          |
//! | `LateArrivalAudit`      | scheduling warnings                        |

pub mod auditor;
pub mod error;
pub mod report;
pub mod rules;


pub use auditor::{Auditor, audit_run};
pub use error::{AuditError, AuditResult};
pub use report::AuditReport;
pub use rules::{
    AuditInput, AuditRule, ControlBlockAudit, DriverRosterAudit, LateArrivalAudit, MealOptionsAudit,
    SplitRestaurantAudit,
};
