//! Wall-clock time of day.
//!
//! # Design
//!
//! Pickup schedules only ever span a single afternoon, so time is held as an
//! integer count of minutes since midnight.  All schedule arithmetic is then
//! exact and comparisons are O(1):
//!
//!   "4:50 PM" = 16 * 60 + 50 = 1010
//!
//! The restaurant catalog publishes times on a 5-minute grid
//! ([`GRID_MINUTES`]); computed start times are rounded *down* onto the same
//! grid so a driver is never told to leave later than the computation allows.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Granularity of every published time, in minutes.
pub const GRID_MINUTES: u16 = 5;

const MINUTES_PER_DAY: u16 = 24 * 60;

// ── ClockTime ─────────────────────────────────────────────────────────────────

/// A time of day with minute resolution.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Build from a 24-hour `hour` and `minute`.  Returns `None` when either
    /// component is out of range.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(ClockTime(hour * 60 + minute))
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    #[inline]
    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// `self + minutes`, clamped to the last minute of the day.
    #[inline]
    pub fn plus(self, minutes: u16) -> ClockTime {
        ClockTime(self.0.saturating_add(minutes).min(MINUTES_PER_DAY - 1))
    }

    /// `self - minutes`, clamped at midnight.
    #[inline]
    pub fn minus(self, minutes: u16) -> ClockTime {
        ClockTime(self.0.saturating_sub(minutes))
    }

    /// Round down onto a `grid`-minute boundary.
    #[inline]
    pub fn floor_to_grid(self, grid: u16) -> ClockTime {
        if grid == 0 {
            return self;
        }
        ClockTime(self.0 - self.0 % grid)
    }

    #[inline]
    pub fn is_on_grid(self, grid: u16) -> bool {
        grid == 0 || self.0 % grid == 0
    }
}

impl FromStr for ClockTime {
    type Err = CoreError;

    /// Accepts `5:00 PM`, `5:00pm`, `11:05 am`, and 24-hour `17:00`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidTime { value: s.to_owned() };
        let text = s.trim();
        let upper = text.to_ascii_uppercase();

        let (clock, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
            (rest.trim_end(), Some(false))
        } else if let Some(rest) = upper.strip_suffix("PM") {
            (rest.trim_end(), Some(true))
        } else {
            (upper.as_str(), None)
        };

        let (h, m) = clock.split_once(':').ok_or_else(invalid)?;
        if m.len() != 2 {
            return Err(invalid());
        }
        let hour: u16 = h.trim().parse().map_err(|_| invalid())?;
        let minute: u16 = m.parse().map_err(|_| invalid())?;

        let hour = match meridiem {
            None => hour,
            Some(_) if hour == 0 || hour > 12 => return Err(invalid()),
            Some(false) => hour % 12,
            Some(true) => hour % 12 + 12,
        };

        ClockTime::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl fmt::Display for ClockTime {
    /// Renders in the catalog's own style, e.g. `5:00 PM`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, suffix) = match self.hour() {
            0 => (12, "AM"),
            h @ 1..=11 => (h, "AM"),
            12 => (12, "PM"),
            h => (h - 12, "PM"),
        };
        write!(f, "{}:{:02} {}", hour, self.minute(), suffix)
    }
}
