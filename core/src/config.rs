//! Store policy configuration: opening hours, register coverage tables,
//! break windows and assignment tuning.
//!
//! Loaded from `data/store_policy.json` by the runner.
//! In tests, use `RosterConfig::standard()` and adjust fields directly.

use crate::{
    error::{RosterError, RosterResult},
    roster::CsTask,
    slot::{slot_range, time_to_slot, ShiftRange},
    types::{DayKey, Slot},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDay {
    pub open:              String,
    pub close:             String,
    /// Required register headcount, one entry per open slot.
    pub register_coverage: Vec<u32>,
    /// Whether late-shift employees get a 40-minute break this day.
    #[serde(default)]
    pub late_breaks:       bool,
}

/// Half-open `[start, end)` slot window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotWindow {
    pub start: Slot,
    pub end:   Slot,
}

impl SlotWindow {
    pub const fn new(start: Slot, end: Slot) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        usize::from(self.end.saturating_sub(self.start))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreakWindows {
    /// 40-minute window for the first half of the batch.
    pub first:            SlotWindow,
    /// Later 40-minute window for the second half.
    pub second:           SlotWindow,
    /// 10-minute breaks go no earlier than `lunch_window_end + ten_minute_gap + 1`.
    pub lunch_window_end: Slot,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ShiftCategory {
    Morning,
    Afternoon,
    Late,
}

impl ShiftCategory {
    pub const ALL: [ShiftCategory; 3] = [Self::Morning, Self::Afternoon, Self::Late];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakPolicy {
    /// Shifts starting at or before this slot are morning shifts.
    pub morning_max_start: Slot,
    /// Shifts starting at or after this slot are late shifts.
    pub late_min_start:    Slot,
    /// Strictly more than this many scheduled hours earns a 40-minute break.
    pub long_shift_hours:  f64,
    /// Place a 10-minute break right after each 40-minute window.
    pub couple_ten_minute: bool,
    pub morning:           BreakWindows,
    pub afternoon:         BreakWindows,
    pub late:              BreakWindows,
}

impl BreakPolicy {
    pub fn category_of(&self, shift_start: Slot) -> ShiftCategory {
        if shift_start <= self.morning_max_start {
            ShiftCategory::Morning
        } else if shift_start >= self.late_min_start {
            ShiftCategory::Late
        } else {
            ShiftCategory::Afternoon
        }
    }

    pub fn windows(&self, category: ShiftCategory) -> &BreakWindows {
        match category {
            ShiftCategory::Morning => &self.morning,
            ShiftCategory::Afternoon => &self.afternoon,
            ShiftCategory::Late => &self.late,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentPolicy {
    /// Slots an employee is held on a task once selected.
    pub block_size:               u16,
    /// Block length on the opening slot when the store opens on a half hour.
    #[serde(default)]
    pub opening_block_size:       Option<u16>,
    /// A block ending within this many slots of the shift end or store
    /// close is stretched to reach it.
    pub block_tolerance:          u16,
    /// How far ahead to look for the employee's own 40-minute break.
    #[serde(default)]
    pub break_lookahead:          Option<u16>,
    /// Skip employees whose last shift slot is this close to the current slot.
    #[serde(default)]
    pub shift_end_guard:          Option<u16>,
    pub fairness_reset_threshold: usize,
    pub ten_minute_gap:           u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub days:       BTreeMap<DayKey, StoreDay>,
    pub breaks:     BreakPolicy,
    pub assignment: AssignmentPolicy,
}

/// One day's resolved policy, ready for the engine.
#[derive(Debug, Clone)]
pub struct DayPlan {
    pub day:                DayKey,
    pub store:              ShiftRange,
    pub register_coverage:  Vec<u32>,
    pub opens_on_half_hour: bool,
    pub late_breaks:        bool,
    pub breaks:             BreakPolicy,
    pub assignment:         AssignmentPolicy,
}

impl DayPlan {
    /// Required headcount for `task` at `slot`.
    pub fn required(&self, task: CsTask, slot: Slot) -> usize {
        match task {
            CsTask::FittingRoom | CsTask::Greeter => 1,
            CsTask::Register => slot
                .checked_sub(self.store.start)
                .and_then(|offset| self.register_coverage.get(usize::from(offset)))
                .map_or(0, |&n| n as usize),
        }
    }
}

impl RosterConfig {
    /// Load from a JSON policy file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content).map_err(|e| anyhow::anyhow!("Invalid policy {path}: {e}"))
    }

    pub fn from_json(json: &str) -> RosterResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RosterResult<()> {
        for (day, store_day) in &self.days {
            let store = slot_range(&store_day.open, &store_day.close)?;
            if store.is_empty() {
                return Err(RosterError::InvalidStoreHours { day: day.clone() });
            }
            if store_day.register_coverage.len() != store.len() {
                return Err(RosterError::CoverageMismatch {
                    day:      day.clone(),
                    expected: store.len(),
                    actual:   store_day.register_coverage.len(),
                });
            }
        }
        Ok(())
    }

    pub fn plan_for(&self, day: &str) -> RosterResult<DayPlan> {
        let store_day = self
            .days
            .get(day)
            .ok_or_else(|| RosterError::UnknownDay { day: day.to_string() })?;
        let store = slot_range(&store_day.open, &store_day.close)?;
        if store.is_empty() {
            return Err(RosterError::InvalidStoreHours { day: day.to_string() });
        }
        Ok(DayPlan {
            day: day.to_string(),
            store,
            register_coverage: store_day.register_coverage.clone(),
            opens_on_half_hour: time_to_slot(&store_day.open)? % 4 == 2,
            late_breaks: store_day.late_breaks,
            breaks: self.breaks.clone(),
            assignment: self.assignment.clone(),
        })
    }

    /// The store's standard policy.
    pub fn standard() -> Self {
        let weekday = || StoreDay {
            open:              "09:30".into(),
            close:             "18:00".into(),
            register_coverage: coverage(&[(1, 2), (2, 32)]),
            late_breaks:       false,
        };
        let weekend = || StoreDay {
            open:              "10:00".into(),
            close:             "19:00".into(),
            register_coverage: coverage(&[(1, 4), (2, 4), (3, 20), (2, 8)]),
            late_breaks:       false,
        };
        let thursday = StoreDay {
            open:              "09:30".into(),
            close:             "21:00".into(),
            register_coverage: coverage(&[(1, 2), (2, 40), (1, 4)]),
            late_breaks:       true,
        };

        let mut days = BTreeMap::new();
        for day in ["M", "T", "W", "F"] {
            days.insert(day.to_string(), weekday());
        }
        days.insert("Th".to_string(), thursday);
        days.insert("Sa".to_string(), weekend());
        days.insert("Su".to_string(), weekend());

        Self {
            days,
            breaks: BreakPolicy {
                morning_max_start: 40,
                late_min_start:    50,
                long_shift_hours:  6.0,
                couple_ten_minute: true,
                morning: BreakWindows {
                    first:            SlotWindow::new(48, 51), // 12:00 - 12:45
                    second:           SlotWindow::new(52, 55), // 13:00 - 13:45
                    lunch_window_end: 55,
                },
                afternoon: BreakWindows {
                    first:            SlotWindow::new(56, 59), // 14:00 - 14:45
                    second:           SlotWindow::new(60, 63), // 15:00 - 15:45
                    lunch_window_end: 63,
                },
                late: BreakWindows {
                    first:            SlotWindow::new(64, 67), // 16:00 - 16:45
                    second:           SlotWindow::new(68, 71), // 17:00 - 17:45
                    lunch_window_end: 71,
                },
            },
            assignment: AssignmentPolicy {
                block_size:               4,
                opening_block_size:       Some(6),
                block_tolerance:          3,
                break_lookahead:          Some(8),
                shift_end_guard:          Some(2),
                fairness_reset_threshold: 2,
                ten_minute_gap:           3,
            },
        }
    }
}

/// Expand (headcount, run length) pairs into a per-slot table.
fn coverage(runs: &[(u32, usize)]) -> Vec<u32> {
    runs.iter()
        .flat_map(|&(n, len)| std::iter::repeat(n).take(len))
        .collect()
}
