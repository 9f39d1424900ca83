//! Control block errors.
//!
//! Every message is a fixed template filled with the offending literal
//! values, so callers can match on a stable fragment such as
//! `"does not match"` or `"cannot start with @"`.

use dl_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlBlockError {
    #[error(transparent)]
    Core(#[from] CoreError),

    // ── Structure ─────────────────────────────────────────────────────────
    #[error("line {line}: control block rows must have Consumer and Driver set to FALSE ({column} is TRUE)")]
    MarkerFlags { column: &'static str, line: usize },

    #[error("line {line}: unexpected directive \"{directive}\"")]
    UnexpectedDirective { directive: String, line: usize },

    #[error("line {line}: ControlBegin has no matching ControlEnd")]
    Unterminated { line: usize },

    #[error("line {line}: ControlEnd without a preceding ControlBegin")]
    EndWithoutBegin { line: usize },

    #[error("line {line}: second control block (first began at line {first_line})")]
    SecondBlock { line: usize, first_line: usize },

    // ── Directive grammar ─────────────────────────────────────────────────
    #[error("line {line}: more than one Version directive (first at line {first_line})")]
    DuplicateVersion { line: usize, first_line: usize },

    #[error("line {line}: invalid Version \"{value}\"")]
    InvalidVersion { value: String, line: usize },

    #[error("{directive} value \"{value}\" at line {line} does not match \"{shape}\"")]
    FieldCount {
        directive: &'static str,
        value:     String,
        shape:     &'static str,
        line:      usize,
    },

    #[error("Empty {directive} user name at line {line}")]
    EmptyUserName { directive: &'static str, line: usize },

    #[error("{directive} user name \"{value}\" at line {line} cannot start with @")]
    UserNameAt {
        directive: &'static str,
        value:     String,
        line:      usize,
    },

    #[error("{directive} user name \"{value}\" at line {line} cannot contain spaces")]
    UserNameSpaces {
        directive: &'static str,
        value:     String,
        line:      usize,
    },

    #[error("Empty {directive} {field} at line {line}")]
    EmptyField {
        directive: &'static str,
        field:     &'static str,
        line:      usize,
    },

    #[error("line {line}: too many OpsManager directives, only one is supported (first at line {first_line})")]
    TooManyOpsManagers { line: usize, first_line: usize },

    #[error("{directive} value \"{value}\" at line {line} is an invalid setting, expected enable or disable")]
    InvalidSetting {
        directive: &'static str,
        value:     String,
        line:      usize,
    },

    #[error("StartTimes value \"{value}\" at line {line} is not a valid time")]
    InvalidStartTime { value: String, line: usize },

    // ── Audit ─────────────────────────────────────────────────────────────
    #[error("Control block version {version} is not supported.")]
    UnsupportedVersion { version: u32 },

    #[error("{directive} value {placeholder} at line {line} must be replaced by a valid {expected}")]
    Placeholder {
        directive:   String,
        placeholder: String,
        expected:    String,
        line:        usize,
    },

    #[error("Control block does not contain an OpsManager (UserName|Phone) entry")]
    NoOpsManager,

    #[error("Control block missing {variable} variable, required for version {version}")]
    MissingVariable {
        variable: &'static str,
        version:  String,
    },

    #[error("Control block has too many {variable} variables ({count})")]
    TooManyVariables { variable: &'static str, count: usize },

    #[error("{directive} user \"{user}\" at line {line} is not a member")]
    UnknownUser {
        directive: &'static str,
        user:      String,
        line:      usize,
    },

    #[error("SplitRestaurant \"{restaurant}\" at line {line} is not a restaurant on this run")]
    UnknownSplitRestaurant { restaurant: String, line: usize },

    #[error("SplitRestaurant cleanup driver \"{user}\" for \"{restaurant}\" at line {line} is not a member")]
    UnknownCleanupDriver {
        user:       String,
        restaurant: String,
        line:       usize,
    },

    #[error("wrong cleanup driver \"{user}\" for split restaurant \"{restaurant}\" at line {line}: not a driver of that restaurant")]
    WrongCleanupDriver {
        user:       String,
        restaurant: String,
        line:       usize,
    },
}

pub type ControlResult<T> = Result<T, ControlBlockError>;
