//! `dl-schedule` — per-driver pickup start times.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`config`] | `ScheduleConfig` (travel, back-off and window constants)   |
//! | [`engine`] | `ScheduleEngine`, `Stop`, `StopTiming`, `DriverSchedule`   |
//! | [`error`]  | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! Travel between stops is a fixed per-hop constant; there is no geography.

pub mod config;
pub mod engine;
pub mod error;

#[cfg(test)]
mod tests;

pub use config::ScheduleConfig;
pub use engine::{DriverSchedule, ScheduleEngine, Stop, StopTiming};
pub use error::{ScheduleError, ScheduleResult};
