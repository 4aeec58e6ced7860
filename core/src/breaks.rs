//! Break scheduler: places 40-minute breaks before any task is assigned,
//! so the slot pass can treat them as fixed obstacles.
//!
//! Employees are grouped by shift category. Within a category only long
//! shifts are eligible; the batch is split at random into two halves, the
//! first taking the category's first window and the rest the later one.
//! When the policy couples break kinds, each half also gets its 10-minute
//! break in the slot right after its window.

use crate::{
    config::{BreakWindows, ShiftCategory, SlotWindow},
    error::RosterResult,
    event::RosterEvent,
    phase::{DayContext, RosterPhase},
    rng::PhaseRng,
    roster::Bucket,
    types::{EmployeeId, Slot},
};

pub struct BreakPhase;

impl RosterPhase for BreakPhase {
    fn name(&self) -> &'static str { "breaks" }

    fn run(&mut self, day: &mut DayContext<'_>, rng: &mut PhaseRng) -> RosterResult<Vec<RosterEvent>> {
        let mut events = Vec::new();
        let plan = day.plan;
        let directory = day.directory;
        let policy = &plan.breaks;

        for category in ShiftCategory::ALL {
            if category == ShiftCategory::Late && !plan.late_breaks {
                continue;
            }

            let batch: Vec<EmployeeId> = directory
                .employees()
                .iter()
                .filter(|e| policy.category_of(e.shift.start) == category)
                .filter(|e| e.hours > policy.long_shift_hours)
                .map(|e| e.name.clone())
                .collect();

            if batch.is_empty() {
                log::debug!("no {category:?} employees eligible for a 40-minute break");
                events.push(RosterEvent::BreakBatchEmpty { category });
                continue;
            }

            let first_half = rng.sample(&batch, batch.len() / 2);
            let second_half: Vec<EmployeeId> = batch
                .iter()
                .filter(|e| !first_half.contains(e))
                .cloned()
                .collect();

            let windows = policy.windows(category);
            for (group, window) in [(&first_half, windows.first), (&second_half, windows.second)] {
                place_group(day, group, window, windows, category, &mut events);
            }
        }

        log::info!("breaks: placed {} break windows", events.iter()
            .filter(|e| matches!(e, RosterEvent::BreakAssigned { .. }))
            .count());
        Ok(events)
    }
}

fn place_group(
    day: &mut DayContext<'_>,
    group: &[EmployeeId],
    window: SlotWindow,
    windows: &BreakWindows,
    category: ShiftCategory,
    events: &mut Vec<RosterEvent>,
) {
    let couple = day.plan.breaks.couple_ten_minute;

    for slot in window.start..window.end {
        for name in group {
            if on_shift_and_open(day, name, slot) {
                day.roster.assign(slot, Bucket::Break40, name);
            }
        }
    }

    for name in group {
        if couple && on_shift_and_open(day, name, window.end) {
            day.roster.assign(window.end, Bucket::Break10, name);
        }
        log::debug!(
            "{name}: 40-minute break {}..{} ({category:?}, lunch window ends {})",
            window.start, window.end, windows.lunch_window_end
        );
        events.push(RosterEvent::BreakAssigned {
            employee: name.clone(),
            category,
            start: window.start,
            end: window.end,
        });
    }
}

fn on_shift_and_open(day: &DayContext<'_>, name: &str, slot: Slot) -> bool {
    day.roster.contains_slot(slot)
        && day
            .directory
            .get(name)
            .is_some_and(|e| e.shift.contains(slot))
}
