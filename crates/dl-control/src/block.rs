//! The parsed control block.
//!
//! Directives that the format allows at most once (e.g. `FoodSources`) are
//! still stored as a list of occurrences: the grammar accepts repeats and
//! [`ControlBlock::audit`](crate::ControlBlock::audit) reports them, so the
//! parser never has to pick a winner.

use std::collections::BTreeMap;

use dl_core::ClockTime;

use crate::ControlBlockVersion;

// ── Entries ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpsManager {
    pub user_name: String,
    pub phone:     String,
    pub line:      usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitRestaurant {
    pub name:           String,
    pub cleanup_driver: String,
    pub line:           usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackupDriver {
    pub user_name: String,
    pub line:      usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestaurantEmoji {
    pub emoji: String,
    pub line:  usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoodSources {
    pub meal:    String,
    pub grocery: String,
    pub line:    usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartTimes {
    pub times: Vec<ClockTime>,
    pub line:  usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionList {
    pub options: Vec<String>,
    pub line:    usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupManager {
    pub user_name: String,
    pub line:      usize,
}

/// A `ReplaceThisBy…` default left in place by the operator.  Accepted while
/// parsing; fatal at audit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placeholder {
    pub directive:   String,
    pub placeholder: String,
    /// What a valid replacement is, e.g. `"user name"`.
    pub expected:    String,
    pub line:        usize,
}

/// `enable` / `disable` audit switch.  Audits default to enabled.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AuditToggle {
    #[default]
    Enabled,
    Disabled,
}

impl AuditToggle {
    pub fn is_enabled(self) -> bool {
        self == AuditToggle::Enabled
    }
}

// ── V300Fields ────────────────────────────────────────────────────────────────

/// Variables only version 3-0-0 blocks carry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct V300Fields {
    pub food_sources:        Vec<FoodSources>,
    pub start_times:         Vec<StartTimes>,
    pub alt_meal_options:    Vec<OptionList>,
    pub alt_grocery_options: Vec<OptionList>,
    pub pickup_managers:     Vec<PickupManager>,
}

// ── ControlBlock ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlBlock {
    pub version:                 ControlBlockVersion,
    /// Line of the `ControlBegin` marker; 0 for a synthesized empty block.
    pub begin_line:              usize,
    pub ops_managers:            Vec<OpsManager>,
    pub split_restaurants:       Vec<SplitRestaurant>,
    pub backup_drivers:          Vec<BackupDriver>,
    /// Restaurant name → emoji.  A later entry for the same name replaces
    /// the earlier one.
    pub restaurant_emoji:        BTreeMap<String, RestaurantEmoji>,
    pub late_arrival_audit:      AuditToggle,
    pub split_restaurant_audits: AuditToggle,
    pub restaurants_audit:       AuditToggle,
    /// Non-fatal parse warnings, in document order.
    pub warnings:                Vec<String>,
    pub placeholders:            Vec<Placeholder>,
    /// Present only for version 3-0-0 (and unsupported newer) blocks.
    pub v300:                    Option<V300Fields>,
}

impl ControlBlock {
    /// An empty block of `version`, as if the markers enclosed no directives.
    pub fn new(version: ControlBlockVersion, begin_line: usize) -> Self {
        let v300 = matches!(
            version,
            ControlBlockVersion::V300 | ControlBlockVersion::Unsupported(_)
        )
        .then(V300Fields::default);
        Self { version, begin_line, v300, ..Self::default() }
    }

    pub fn ops_manager(&self) -> Option<&OpsManager> {
        self.ops_managers.first()
    }

    pub fn split_restaurant(&self, name: &str) -> Option<&SplitRestaurant> {
        self.split_restaurants.iter().find(|s| s.name == name)
    }

    pub fn emoji_for(&self, restaurant: &str) -> Option<&str> {
        self.restaurant_emoji.get(restaurant).map(|e| e.emoji.as_str())
    }

    pub fn is_late_arrival_audit_enabled(&self) -> bool {
        self.late_arrival_audit.is_enabled()
    }

    pub fn is_split_restaurant_audit_enabled(&self) -> bool {
        self.split_restaurant_audits.is_enabled()
    }

    pub fn is_restaurants_audit_enabled(&self) -> bool {
        self.restaurants_audit.is_enabled()
    }

    // ── V300 accessors (first occurrence) ─────────────────────────────────

    pub fn food_sources(&self) -> Option<&FoodSources> {
        self.v300.as_ref()?.food_sources.first()
    }

    pub fn start_times(&self) -> &[ClockTime] {
        self.v300
            .as_ref()
            .and_then(|v| v.start_times.first())
            .map(|s| s.times.as_slice())
            .unwrap_or(&[])
    }

    pub fn alt_meal_options(&self) -> &[String] {
        self.v300
            .as_ref()
            .and_then(|v| v.alt_meal_options.first())
            .map(|o| o.options.as_slice())
            .unwrap_or(&[])
    }

    pub fn alt_grocery_options(&self) -> &[String] {
        self.v300
            .as_ref()
            .and_then(|v| v.alt_grocery_options.first())
            .map(|o| o.options.as_slice())
            .unwrap_or(&[])
    }

    pub fn pickup_managers(&self) -> impl Iterator<Item = &str> {
        self.v300
            .iter()
            .flat_map(|v| v.pickup_managers.iter().map(|p| p.user_name.as_str()))
    }

    pub(crate) fn v300_mut(&mut self) -> &mut V300Fields {
        self.v300.get_or_insert_with(V300Fields::default)
    }
}
