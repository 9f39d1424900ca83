//! The start-time back-off algorithm.
//!
//! # Offset model
//!
//! Each stop `i` on a driver's pickup list is reached `offset(i)` minutes
//! after the driver's start time:
//!
//! ```text
//! offset(0)   = 0
//! hops(i)     = hops(i-1) + hop(route(i-1), route(i))
//! backoff(i)  = backoff_step × ⌊orders carried before i / orders_per_step⌋
//! offset(i)   = hops(i) + backoff(i)
//! ```
//!
//! # Start time
//!
//! Every stop must be reached by its route's bound.  The bound is set by the
//! first stop of a run of same-route stops; moving to another route keeps the
//! earlier of the current bound and the new stop's baseline.  The start time
//! is the latest time meeting every bound, floored onto the grid:
//!
//! ```text
//! start = floor_grid( min_i(bound(i) − offset(i)) )
//! ```
//!
//! A stop whose own baseline is earlier than its bound (e.g. a 4:50 PM
//! restaurant visited after a 5:00 PM one on the same route) is reached late
//! and produces warnings.

use dl_core::ClockTime;
use dl_restaurants::RestaurantCatalog;
use tracing::{debug, warn};

use crate::{ScheduleConfig, ScheduleError, ScheduleResult};

/// One pickup stop: a restaurant and the orders collected there.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Stop<'a> {
    pub restaurant: &'a str,
    pub orders:     u32,
}

impl<'a> Stop<'a> {
    pub fn new(restaurant: &'a str, orders: u32) -> Self {
        Self { restaurant, orders }
    }
}

/// Timing of one stop in a computed schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopTiming {
    pub restaurant: String,
    pub route:      String,
    /// The restaurant's own start time from the catalog.
    pub baseline:   ClockTime,
    /// Minutes after the driver's start.
    pub offset:     u16,
    pub arrival:    ClockTime,
}

impl StopTiming {
    pub fn is_after_expected(&self) -> bool {
        self.arrival > self.baseline
    }

    pub fn is_after_closing(&self, config: &ScheduleConfig) -> bool {
        self.arrival >= self.baseline.plus(config.closing_window_minutes)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverSchedule {
    /// `None` when the driver has no pickups.
    pub start_time: Option<ClockTime>,
    pub stops:      Vec<StopTiming>,
    pub warnings:   Vec<String>,
}

/// Computes driver schedules against one catalog.
///
/// ```ignore
/// let engine = ScheduleEngine::new(&catalog, ScheduleConfig::default())
///     .late_arrival_warnings(block.is_late_arrival_audit_enabled());
/// let schedule = engine.schedule(&[Stop::new("Cafe Raj", 3)])?;
/// ```
pub struct ScheduleEngine<'c> {
    catalog:       &'c RestaurantCatalog,
    config:        ScheduleConfig,
    late_arrivals: bool,
}

impl<'c> ScheduleEngine<'c> {
    pub fn new(catalog: &'c RestaurantCatalog, config: ScheduleConfig) -> Self {
        Self { catalog, config, late_arrivals: true }
    }

    /// Whether late-arrival warnings are produced.  The start time is
    /// computed either way.
    pub fn late_arrival_warnings(mut self, enabled: bool) -> Self {
        self.late_arrivals = enabled;
        self
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Schedule one driver's pickups, given in visiting order.
    pub fn schedule(&self, stops: &[Stop<'_>]) -> ScheduleResult<DriverSchedule> {
        if stops.is_empty() {
            return Ok(DriverSchedule::default());
        }

        struct Planned<'a> {
            restaurant: &'a str,
            route:      &'a str,
            baseline:   ClockTime,
            offset:     u16,
            bound:      ClockTime,
        }

        let mut planned: Vec<Planned<'_>> = Vec::with_capacity(stops.len());
        let mut hops: u16 = 0;
        let mut carried: u32 = 0;

        for stop in stops {
            let master = self.catalog.get(stop.restaurant).ok_or_else(|| {
                ScheduleError::UnknownRestaurant { restaurant: stop.restaurant.to_owned() }
            })?;

            let bound = match planned.last() {
                None => master.start_time,
                Some(prev) => {
                    hops = hops.saturating_add(self.config.hop(prev.route, &master.route));
                    if prev.route == master.route {
                        prev.bound
                    } else {
                        prev.bound.min(master.start_time)
                    }
                }
            };

            planned.push(Planned {
                restaurant: stop.restaurant,
                route: &master.route,
                baseline: master.start_time,
                offset: hops.saturating_add(self.config.backoff(carried)),
                bound,
            });
            carried = carried.saturating_add(stop.orders);
        }

        let start = planned
            .iter()
            .map(|p| p.bound.minus(p.offset))
            .min()
            .unwrap_or(ClockTime::MIDNIGHT)
            .floor_to_grid(self.config.grid_minutes);

        let timings: Vec<StopTiming> = planned
            .iter()
            .map(|p| StopTiming {
                restaurant: p.restaurant.to_owned(),
                route:      p.route.to_owned(),
                baseline:   p.baseline,
                offset:     p.offset,
                arrival:    start.plus(p.offset),
            })
            .collect();

        let warnings = if self.late_arrivals { self.warnings(&timings) } else { Vec::new() };

        debug!(start = %start, stops = timings.len(), warnings = warnings.len(), "scheduled driver");
        Ok(DriverSchedule { start_time: Some(start), stops: timings, warnings })
    }

    fn warnings(&self, timings: &[StopTiming]) -> Vec<String> {
        let mut warnings = Vec::new();
        for t in timings {
            if t.is_after_closing(&self.config) {
                warnings.push(format!(
                    "{} may be reached after closing (arrival {}, closing {})",
                    t.restaurant,
                    t.arrival,
                    t.baseline.plus(self.config.closing_window_minutes)
                ));
            }
            if t.is_after_expected() {
                warnings.push(format!(
                    "{} may be reached after expected time (arrival {}, expected {})",
                    t.restaurant, t.arrival, t.baseline
                ));
            }
        }
        for w in &warnings {
            warn!("{w}");
        }
        warnings
    }
}
