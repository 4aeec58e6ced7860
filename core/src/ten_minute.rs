//! 10-minute break post-pass.
//!
//! Runs after every slot is filled. An employee still without a "10"
//! entry is pulled off home-department floor work at one random slot
//! after their lunch window (plus the configured gap) and before their
//! last shift slot. No candidate slot means no break; that is accepted.

use crate::{
    error::RosterResult,
    event::RosterEvent,
    phase::{DayContext, RosterPhase},
    rng::PhaseRng,
    roster::Bucket,
    types::Slot,
};

pub struct TenMinuteBreakPhase;

impl RosterPhase for TenMinuteBreakPhase {
    fn name(&self) -> &'static str { "ten_minute_breaks" }

    fn run(&mut self, day: &mut DayContext<'_>, rng: &mut PhaseRng) -> RosterResult<Vec<RosterEvent>> {
        let plan = day.plan;
        let directory = day.directory;
        let gap = plan.assignment.ten_minute_gap;
        let mut events = Vec::new();

        for employee in directory.employees() {
            let name = employee.name.as_str();
            let already_has_one = day
                .roster
                .entries_for(name)
                .iter()
                .any(|(_, bucket)| *bucket == Bucket::Break10);
            if already_has_one {
                continue;
            }

            let Some(home) = employee.department.department().map(Bucket::Department) else {
                events.push(RosterEvent::TenMinuteBreakSkipped { employee: employee.name.clone() });
                continue;
            };

            let category = plan.breaks.category_of(employee.shift.start);
            let earliest = plan.breaks.windows(category).lunch_window_end + gap;
            let candidates: Vec<Slot> = day
                .roster
                .slots()
                .filter(|&s| s > earliest && s < employee.shift.last_slot())
                .filter(|&s| day.roster.bucket(s, home).iter().any(|e| e == name))
                .collect();

            let Some(&slot) = rng.choose(&candidates) else {
                log::debug!("{name}: no floor slot free for a 10-minute break");
                events.push(RosterEvent::TenMinuteBreakSkipped { employee: employee.name.clone() });
                continue;
            };

            let left = day.roster.remove_employee(slot, name);
            day.roster.assign(slot, Bucket::Break10, name);
            let from = left
                .iter()
                .map(|b| b.label())
                .collect::<Vec<_>>()
                .join(",");
            log::debug!("slot {slot}: {name} moved from {from} to a 10-minute break");
            events.push(RosterEvent::TenMinuteBreakAssigned {
                slot,
                employee: employee.name.clone(),
                from,
            });
        }

        log::info!(
            "ten_minute_breaks: {} placed, {} skipped",
            events.iter().filter(|e| matches!(e, RosterEvent::TenMinuteBreakAssigned { .. })).count(),
            events.iter().filter(|e| matches!(e, RosterEvent::TenMinuteBreakSkipped { .. })).count()
        );
        Ok(events)
    }
}
