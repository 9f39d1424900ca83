use dl_core::GRID_MINUTES;

/// Travel and back-off constants of the arrival-offset model.
///
/// All values are minutes except `orders_per_step`.  With the `serde`
/// feature, missing fields take their defaults, so a JSON file only needs
/// the values it changes:
///
/// ```json
/// { "route_change_minutes": 15 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScheduleConfig {
    /// Hop between two restaurants on the same route.
    pub same_route_minutes:     u16,
    /// Hop between restaurants on different routes.
    pub route_change_minutes:   u16,
    /// Delay added per `orders_per_step` orders already carried.
    pub backoff_step_minutes:   u16,
    pub orders_per_step:        u32,
    /// Arriving this long after a restaurant's baseline counts as closing.
    pub closing_window_minutes: u16,
    /// Start times are floored onto this grid.
    pub grid_minutes:           u16,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            same_route_minutes:     0,
            route_change_minutes:   10,
            backoff_step_minutes:   5,
            orders_per_step:        5,
            closing_window_minutes: 10,
            grid_minutes:           GRID_MINUTES,
        }
    }
}

impl ScheduleConfig {
    /// Back-off for a stop reached while carrying `carried` orders.
    pub fn backoff(&self, carried: u32) -> u16 {
        let steps = carried.checked_div(self.orders_per_step).unwrap_or(0);
        let minutes = steps.saturating_mul(u32::from(self.backoff_step_minutes));
        u16::try_from(minutes).unwrap_or(u16::MAX)
    }

    /// Travel time from a stop on `from` to a stop on `to`.
    pub fn hop(&self, from: &str, to: &str) -> u16 {
        if from == to { self.same_route_minutes } else { self.route_change_minutes }
    }
}
