//! Directive keys and the field rules every directive shares.
//!
//! A directive row carries its key in the `Name` column and its value in the
//! `User Name` column.  Multi-field values are separated by `|`:
//!
//! ```text
//! OpsManager (UserName|Phone)    jbOpsMgr | 510-555-1212
//! StartTimes                     3:00 PM | 3:10 PM | 3:20 PM
//! ```
//!
//! The rules here (field counts, user-name syntax, empty fields and the
//! `ReplaceThisBy…` placeholder convention) are applied uniformly by every
//! grammar through [`FieldRules`], so a new directive gets them for free.

use crate::block::Placeholder;
use crate::{ControlBlockError, ControlResult};

// ── Markers ───────────────────────────────────────────────────────────────────

pub const CONTROL_BEGIN: &str = "ControlBegin";
pub const CONTROL_END: &str = "ControlEnd";
/// Keys in this namespace are structural markers, never key/value pairs.
pub const MARKER_PREFIX: &str = "Control";

/// Prefix shared by every default value a fresh control block ships with.
pub const PLACEHOLDER_PREFIX: &str = "ReplaceThisBy";

// ── Keys ──────────────────────────────────────────────────────────────────────

pub const VERSION: &str = "Version";

pub const OPS_MANAGER: &str = "OpsManager (UserName|Phone)";
pub const SPLIT_RESTAURANT: &str = "SplitRestaurant (Name|CleanupDriverUserName)";
pub const BACKUP_DRIVER: &str = "BackupDriverUserName";

pub const RESTAURANT_EMOJI: &str = "Restaurant (Name|Emoji)";
pub const LATE_ARRIVAL_AUDIT: &str = "LateArrivalAudit";
pub const SPLIT_RESTAURANT_AUDITS: &str = "SplitRestaurantAudits";
pub const RESTAURANTS_AUDIT: &str = "RestaurantsAudit";

pub const FOOD_SOURCES: &str = "FoodSources (Meal|Grocery)";
pub const START_TIMES: &str = "StartTimes";
pub const ALT_MEAL_OPTIONS: &str = "AltMealOptions";
pub const ALT_GROCERY_OPTIONS: &str = "AltGroceryOptions";
pub const PICKUP_MANAGER: &str = "PickupManager";

// ── RawDirective ──────────────────────────────────────────────────────────────

/// One key/value row from inside a control block, trimmed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawDirective<'a> {
    pub key:   &'a str,
    pub value: &'a str,
    pub line:  usize,
}

/// `true` for a `ReplaceThisBy…` default value.
pub fn is_placeholder(value: &str) -> bool {
    value.starts_with(PLACEHOLDER_PREFIX)
}

// ── FieldRules ────────────────────────────────────────────────────────────────

/// Field validation for one directive occurrence.
///
/// Placeholders found along the way are appended to the block's pending
/// list; they pass parsing and fail at audit.
pub(crate) struct FieldRules<'b> {
    pub directive: &'static str,
    pub line:      usize,
    placeholders:  &'b mut Vec<Placeholder>,
}

impl<'b> FieldRules<'b> {
    pub fn new(directive: &'static str, line: usize, placeholders: &'b mut Vec<Placeholder>) -> Self {
        Self { directive, line, placeholders }
    }

    /// Split `value` on `|` into exactly `count` trimmed fields.
    pub fn split_exact<'v>(
        &self,
        value: &'v str,
        count: usize,
        shape: &'static str,
    ) -> ControlResult<Vec<&'v str>> {
        let fields: Vec<&str> = value.split('|').map(str::trim).collect();
        if fields.len() != count {
            return Err(ControlBlockError::FieldCount {
                directive: self.directive,
                value:     value.to_owned(),
                shape,
                line:      self.line,
            });
        }
        Ok(fields)
    }

    /// Split `value` on `|` into one or more non-empty trimmed fields.
    pub fn split_list<'v>(&self, value: &'v str, field: &'static str) -> ControlResult<Vec<&'v str>> {
        let fields: Vec<&str> = value.split('|').map(str::trim).collect();
        if fields.iter().any(|f| f.is_empty()) {
            return Err(self.empty(field));
        }
        Ok(fields)
    }

    /// Record `value` if it is a placeholder.  Returns `true` when it was.
    pub fn placeholder(&mut self, value: &str, expected: &'static str) -> bool {
        if !is_placeholder(value) {
            return false;
        }
        self.placeholders.push(Placeholder {
            directive:   self.directive.to_owned(),
            placeholder: value.to_owned(),
            expected:    expected.to_owned(),
            line:        self.line,
        });
        true
    }

    /// A non-empty field.  Placeholders are accepted and recorded.
    pub fn required(&mut self, value: &str, field: &'static str) -> ControlResult<String> {
        if value.is_empty() {
            return Err(self.empty(field));
        }
        self.placeholder(value, field);
        Ok(value.to_owned())
    }

    /// A forum user name: non-empty, no leading `@`, no whitespace.
    pub fn user_name(&mut self, value: &str) -> ControlResult<String> {
        if value.is_empty() {
            return Err(ControlBlockError::EmptyUserName {
                directive: self.directive,
                line:      self.line,
            });
        }
        if self.placeholder(value, "user name") {
            return Ok(value.to_owned());
        }
        if value.starts_with('@') {
            return Err(ControlBlockError::UserNameAt {
                directive: self.directive,
                value:     value.to_owned(),
                line:      self.line,
            });
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ControlBlockError::UserNameSpaces {
                directive: self.directive,
                value:     value.to_owned(),
                line:      self.line,
            });
        }
        Ok(value.to_owned())
    }

    fn empty(&self, field: &'static str) -> ControlBlockError {
        ControlBlockError::EmptyField {
            directive: self.directive,
            field,
            line: self.line,
        }
    }
}

/// Short directive name used in messages: the key up to its first space,
/// e.g. `OpsManager` for `OpsManager (UserName|Phone)`.
pub fn short_name(key: &'static str) -> &'static str {
    key.split(' ').next().unwrap_or(key)
}
