//! `dl-run` — one delivery run, end to end.
//!
//! # Pipeline
//!
//! ```text
//! restaurant CSV ─┐
//!                 ├─ tokenize ─┬─ restaurant catalog  ─┐
//! workflow CSV ───┘            ├─ control block        ├─ assemble ─ schedule ─ audit
//!                              └─ driver blocks        ─┘
//! ```
//!
//! The three parsers only read the tokenized rows and may run concurrently.
//! Scheduling and auditing need the assembled model and run after them.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the three parsers on Rayon's thread pool.         |
//! | `serde`    | Serialize/Deserialize for `RunConfig` and run results. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dl_run::RunBuilder;
//!
//! let output = RunBuilder::new(template_csv, workflow_csv, &roster).build()?;
//! let run = output.delivery().expect("message request");
//! for warning in &run.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod run;

#[cfg(test)]
mod tests;

pub use builder::RunBuilder;
pub use config::RunConfig;
pub use error::{RunError, RunResult};
pub use run::{DeliveryRun, RunOutput};
