//! Time-slot model: clock times on a fixed 15-minute grid.
//!
//! A clock time maps to the slot containing it by integer division of
//! minutes-since-midnight. Off-grid times truncate ("09:37" is slot 38);
//! that is defined behavior, not an error.

use crate::{
    error::{RosterError, RosterResult},
    types::{Slot, SLOTS_PER_DAY, SLOT_MINUTES},
};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Convert an "HH:MM" clock time to its slot index.
pub fn time_to_slot(time: &str) -> RosterResult<Slot> {
    let parsed = NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|_| {
        RosterError::InvalidTime { value: time.to_string() }
    })?;
    let minutes = parsed.hour() * 60 + parsed.minute();
    Ok((minutes / SLOT_MINUTES) as Slot)
}

/// The half-open slot range `[time_to_slot(start), time_to_slot(end))`.
/// No ordering check is made here; see `ShiftRange::is_empty`.
pub fn slot_range(start: &str, end: &str) -> RosterResult<ShiftRange> {
    Ok(ShiftRange::new(time_to_slot(start)?, time_to_slot(end)?))
}

/// Display form of a slot's start time.
pub fn slot_to_time(slot: Slot) -> String {
    let minutes = u32::from(slot % SLOTS_PER_DAY) * SLOT_MINUTES;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// A contiguous half-open range of slots, used for both employee shifts
/// and store opening hours.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ShiftRange {
    pub start: Slot,
    pub end:   Slot,
}

impl ShiftRange {
    pub fn new(start: Slot, end: Slot) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.start <= slot && slot < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn len(&self) -> usize {
        usize::from(self.end.saturating_sub(self.start))
    }

    /// Last slot inside the range. For an empty range this is `start`.
    pub fn last_slot(&self) -> Slot {
        if self.is_empty() { self.start } else { self.end - 1 }
    }

    /// Slots in increasing order.
    pub fn slots(&self) -> Range<Slot> {
        self.start..self.end.max(self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_hour_shift() {
        assert_eq!(slot_range("09:00", "17:00").unwrap(), ShiftRange::new(36, 68));
    }

    #[test]
    fn half_hour_shift() {
        assert_eq!(slot_range("09:30", "18:00").unwrap(), ShiftRange::new(38, 72));
    }

    #[test]
    fn midnight_and_end_of_day() {
        assert_eq!(slot_range("00:00", "00:15").unwrap(), ShiftRange::new(0, 1));
        assert_eq!(slot_range("23:30", "23:45").unwrap(), ShiftRange::new(94, 95));
    }

    #[test]
    fn off_grid_times_truncate() {
        assert_eq!(time_to_slot("09:37").unwrap(), 38);
        assert_eq!(time_to_slot("09:44").unwrap(), 38);
        assert_eq!(time_to_slot("09:45").unwrap(), 39);
    }

    #[test]
    fn rejects_non_clock_strings() {
        assert!(matches!(time_to_slot("9h30"), Err(RosterError::InvalidTime { .. })));
        assert!(matches!(time_to_slot("25:00"), Err(RosterError::InvalidTime { .. })));
        assert!(matches!(time_to_slot(""), Err(RosterError::InvalidTime { .. })));
    }

    #[test]
    fn slot_to_time_round_trips_grid_times() {
        for time in ["00:00", "09:30", "12:15", "23:45"] {
            assert_eq!(slot_to_time(time_to_slot(time).unwrap()), time);
        }
    }

    #[test]
    fn range_helpers() {
        let r = ShiftRange::new(38, 72);
        assert_eq!(r.len(), 34);
        assert_eq!(r.last_slot(), 71);
        assert!(r.contains(38) && r.contains(71) && !r.contains(72));
        assert_eq!(r.slots().count(), 34);

        let backwards = ShiftRange::new(50, 40);
        assert!(backwards.is_empty());
        assert_eq!(backwards.slots().count(), 0);
    }
}
