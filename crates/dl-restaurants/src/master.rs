//! Catalog types: `RestaurantMaster` and `RestaurantCatalog`.
//!
//! # Template versions
//!
//! | Version | Columns                                      |
//! |---------|----------------------------------------------|
//! | `1`     | `Route`, `Name`, `Start Time`                |
//! | `2-0-0` | + `Emoji`                                    |
//! | `3-0-0` | + `No Pics`                                  |
//!
//! Columns a version does not define take their defaults (empty emoji,
//! `no_pics = false`).

use std::collections::HashMap;

use dl_core::ClockTime;

// ── TemplateVersion ───────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemplateVersion {
    V1,
    V200,
    V300,
}

impl TemplateVersion {
    /// Map an integer version (see [`dl_core::parse_version`]).
    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            1 | 100 => Some(TemplateVersion::V1),
            200 => Some(TemplateVersion::V200),
            300 => Some(TemplateVersion::V300),
            _ => None,
        }
    }

    pub fn has_emoji(self) -> bool {
        !matches!(self, TemplateVersion::V1)
    }

    pub fn has_no_pics(self) -> bool {
        matches!(self, TemplateVersion::V300)
    }
}

// ── RestaurantMaster ──────────────────────────────────────────────────────────

/// One restaurant's reference data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestaurantMaster {
    /// Unique across the catalog.
    pub name:       String,
    pub route:      String,
    /// Baseline pickup time.  Drivers are expected at the restaurant no
    /// later than this; the scheduling engine derives its closing bound from
    /// it.
    pub start_time: ClockTime,
    pub emoji:      String,
    pub no_pics:    bool,
    /// Template line the entry was read from.
    pub line:       usize,
}

// ── RestaurantCatalog ─────────────────────────────────────────────────────────

/// All restaurants of one template, in document order, with O(1) lookup by
/// name.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestaurantCatalog {
    pub version: TemplateVersion,
    restaurants: Vec<RestaurantMaster>,
    by_name:     HashMap<String, usize>,
    routes:      Vec<String>,
}

impl RestaurantCatalog {
    pub(crate) fn new(version: TemplateVersion) -> Self {
        Self {
            version,
            restaurants: Vec::new(),
            by_name:     HashMap::new(),
            routes:      Vec::new(),
        }
    }

    /// Append `restaurant`.  Returns the line of the earlier entry if the
    /// name is already present (the catalog is left unchanged).
    pub(crate) fn insert(&mut self, restaurant: RestaurantMaster) -> Result<(), usize> {
        if let Some(&i) = self.by_name.get(&restaurant.name) {
            return Err(self.restaurants[i].line);
        }
        self.by_name.insert(restaurant.name.clone(), self.restaurants.len());
        self.restaurants.push(restaurant);
        Ok(())
    }

    pub(crate) fn add_route(&mut self, route: String) {
        if !self.routes.contains(&route) {
            self.routes.push(route);
        }
    }

    pub fn get(&self, name: &str) -> Option<&RestaurantMaster> {
        self.by_name.get(name).map(|&i| &self.restaurants[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Restaurants in document order.
    pub fn iter(&self) -> impl Iterator<Item = &RestaurantMaster> {
        self.restaurants.iter()
    }

    /// Route names in the order their marker rows appear.
    pub fn routes(&self) -> &[String] {
        &self.routes
    }

    /// Restaurants on `route`, in document order.
    pub fn on_route<'a>(&'a self, route: &'a str) -> impl Iterator<Item = &'a RestaurantMaster> + 'a {
        self.restaurants.iter().filter(move |r| r.route == route)
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }
}
