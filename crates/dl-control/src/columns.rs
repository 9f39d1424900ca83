//! Workflow columns the control block lives in.
//!
//! The control block shares the workflow sheet's header; only these four
//! columns matter to it.

pub const CONSUMER: &str = "Consumer";
pub const DRIVER: &str = "Driver";
/// Directive key / marker column.
pub const NAME: &str = "Name";
/// Directive value column.
pub const USER_NAME: &str = "User Name";
