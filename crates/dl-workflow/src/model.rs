//! The realized workflow model.
//!
//! # Cross references
//!
//! Drivers and restaurants refer to each other by key, never by pointer:
//!
//! ```text
//! Driver.pickups[i].restaurant ──name──► WorkflowModel.restaurants[name]
//! Restaurant.drivers           ──user──► Driver.user_name
//! Delivery.restaurant          ──name──► (one of the driver's pickups)
//! ```
//!
//! The restaurant arena is built once all driver blocks are parsed, so both
//! directions are always consistent.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use dl_control::{ControlBlock, ControlBlockVersion};
use dl_core::ClockTime;

// ── RequestMode ───────────────────────────────────────────────────────────────

/// What the caller wants from a workflow sheet.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequestMode {
    /// Unrouted: consumers and available drivers, to be routed elsewhere.
    RouteRequest,
    /// Routed: complete driver blocks, ready for messages.
    #[default]
    MessageRequest,
}

// ── RationLayout ──────────────────────────────────────────────────────────────

/// Which set of ration columns a sheet carries.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RationLayout {
    /// `normal`, `veggie`
    Legacy,
    /// `std meals` … `type grocery`
    V300,
}

impl RationLayout {
    /// The layout a control block of `version` expects.
    pub fn for_version(version: ControlBlockVersion) -> Self {
        match version {
            ControlBlockVersion::Legacy | ControlBlockVersion::V200 => RationLayout::Legacy,
            ControlBlockVersion::V300 | ControlBlockVersion::Unsupported(_) => RationLayout::V300,
        }
    }
}

impl fmt::Display for RationLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RationLayout::Legacy => f.write_str("legacy"),
            RationLayout::V300 => f.write_str("3-0-0"),
        }
    }
}

// ── Rations ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rations {
    Legacy {
        normal: u32,
        veggie: u32,
    },
    V300 {
        std_meals:    u32,
        alt_meals:    u32,
        type_meal:    String,
        std_grocery:  u32,
        alt_grocery:  u32,
        type_grocery: String,
    },
}

// ── Pickup / Delivery ─────────────────────────────────────────────────────────

/// One driver's visit to a restaurant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pickup {
    /// Key into [`WorkflowModel::restaurants`].
    pub restaurant: String,
    pub orders:     u32,
    pub address:    String,
    pub details:    String,
    pub line:       usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delivery {
    pub name:         String,
    pub user_name:    String,
    pub phone:        String,
    pub alt_phone:    String,
    pub neighborhood: String,
    pub city:         String,
    pub address:      String,
    pub is_condo:     bool,
    pub details:      String,
    /// Always set in routed sheets; optional in route requests.
    pub restaurant:   Option<String>,
    pub rations:      Rations,
    pub line:         usize,
}

// ── Driver ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Driver {
    pub user_name:  String,
    pub name:       String,
    pub phone:      String,
    pub gmap_url:   String,
    /// `true` if any delivery goes to a condo.
    pub has_condo:  bool,
    /// In visiting order.
    pub pickups:    Vec<Pickup>,
    pub deliveries: Vec<Delivery>,
    /// Filled in by scheduling.
    pub start_time: Option<ClockTime>,
    pub warnings:   Vec<String>,
    pub line:       usize,
}

impl Driver {
    pub fn pickup(&self, restaurant: &str) -> Option<&Pickup> {
        self.pickups.iter().find(|p| p.restaurant == restaurant)
    }

    /// Deliveries fed by `restaurant`.
    pub fn deliveries_from<'a>(&'a self, restaurant: &'a str) -> impl Iterator<Item = &'a Delivery> + 'a {
        self.deliveries
            .iter()
            .filter(move |d| d.restaurant.as_deref() == Some(restaurant))
    }
}

// ── Restaurant (run instance) ─────────────────────────────────────────────────

/// A restaurant as visited on this run, aggregated over all drivers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Restaurant {
    pub name:    String,
    pub address: String,
    pub details: String,
    /// Sum of every driver's pickup orders.
    pub orders:  u32,
    /// User names of the drivers picking up here.
    pub drivers: BTreeSet<String>,
}

impl Restaurant {
    pub fn is_split(&self) -> bool {
        self.drivers.len() > 1
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// A routed workflow.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkflowModel {
    pub control_block: ControlBlock,
    pub layout:        RationLayout,
    pub drivers:       Vec<Driver>,
    pub restaurants:   BTreeMap<String, Restaurant>,
}

impl WorkflowModel {
    pub fn driver(&self, user_name: &str) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.user_name == user_name)
    }

    /// Restaurant name → driver user names, as the control block audit wants it.
    pub fn restaurant_drivers(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.restaurants
            .values()
            .map(|r| (r.name.clone(), r.drivers.clone()))
            .collect()
    }
}

/// An unrouted workflow: consumers still to be assigned and the drivers
/// available to take them.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRequest {
    pub control_block: Option<ControlBlock>,
    pub layout:        RationLayout,
    pub deliveries:    Vec<Delivery>,
    pub drivers:       Vec<Driver>,
}
