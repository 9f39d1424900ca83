//! Control block versions.
//!
//! The version set is fixed by the spreadsheet format, so it is a closed
//! enum rather than an extension point.  Any numeric version the engine does
//! not know parses as [`ControlBlockVersion::Unsupported`] and is rejected by
//! [`crate::ControlBlock::audit`], not by the parser, so operators see every
//! syntax problem in the block before the version complaint.

use std::fmt;

use dl_core::parse_version;

/// Newest version this engine understands.
pub const CONTROL_BLOCK_CURRENT_VERSION: u32 = 300;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlBlockVersion {
    /// No `Version` directive, or `1`.
    #[default]
    Legacy,
    /// `2-0-0`
    V200,
    /// `3-0-0`
    V300,
    Unsupported(u32),
}

impl ControlBlockVersion {
    /// Parse a `Version` directive value.  Returns `None` for non-numeric
    /// labels.
    pub fn from_label(label: &str) -> Option<Self> {
        parse_version(label).map(Self::from_number)
    }

    pub fn from_number(n: u32) -> Self {
        match n {
            1 | 100 => ControlBlockVersion::Legacy,
            200 => ControlBlockVersion::V200,
            300 => ControlBlockVersion::V300,
            other => ControlBlockVersion::Unsupported(other),
        }
    }

    pub fn number(self) -> u32 {
        match self {
            ControlBlockVersion::Legacy => 1,
            ControlBlockVersion::V200 => 200,
            ControlBlockVersion::V300 => 300,
            ControlBlockVersion::Unsupported(n) => n,
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, ControlBlockVersion::Unsupported(_))
    }

    /// `true` for V200 and later, which carry emoji and audit toggles.
    pub fn has_audit_directives(self) -> bool {
        matches!(self, ControlBlockVersion::V200 | ControlBlockVersion::V300)
    }
}

impl fmt::Display for ControlBlockVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlBlockVersion::Legacy => f.write_str("1"),
            ControlBlockVersion::V200 => f.write_str("2-0-0"),
            ControlBlockVersion::V300 => f.write_str("3-0-0"),
            ControlBlockVersion::Unsupported(n) => write!(f, "{n}"),
        }
    }
}
