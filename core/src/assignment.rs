//! Slot assignment pass: walks the open slots in increasing order and,
//! per slot, fills opening duty, customer-service quotas and floor work.
//!
//! Per slot:
//!   1. Available = on shift and not already in any bucket this slot.
//!   2. Hurdle: employees whose shift starts here take the one-slot "H" duty.
//!   3. FR, GR, R in that order, each until its headcount is met:
//!      eligibility pool → undone-today candidates → tracker reset →
//!      (R only) second reset, then borrowing from the previous slot.
//!      A selected employee is held on the task for a block of slots.
//!   4. Everyone left goes to their home department's bucket.
//!   5. Duplicate check: reported, never repaired.
//!
//! Shortfalls are soft: they are logged and recorded as events.

use crate::{
    config::DayPlan,
    directory::{Directory, Employee},
    error::RosterResult,
    event::{ResetReason, RosterEvent},
    phase::{DayContext, RosterPhase},
    rng::PhaseRng,
    roster::{Bucket, CsTask, Roster},
    tracker::TaskDoneTracker,
    types::{EmployeeId, Slot},
};

pub struct SlotAssignmentPhase;

impl RosterPhase for SlotAssignmentPhase {
    fn name(&self) -> &'static str { "slot_assignment" }

    fn run(&mut self, day: &mut DayContext<'_>, rng: &mut PhaseRng) -> RosterResult<Vec<RosterEvent>> {
        let plan = day.plan;
        let directory = day.directory;
        let mut tracker =
            TaskDoneTracker::new(directory.employees().iter().map(|e| e.name.clone()));
        let mut events = Vec::new();

        let slots: Vec<Slot> = day.roster.slots().collect();
        for slot in slots {
            SlotPass::new(plan, directory, &mut day.roster, &mut tracker, &mut *rng, &mut events, slot)
                .run();
        }

        log::info!(
            "slot_assignment: {} slots filled for day {}, {} warnings",
            day.roster.slots().count(),
            plan.day,
            events.iter().filter(|e| e.is_warning()).count()
        );
        Ok(events)
    }
}

/// Working state for one slot.
struct SlotPass<'a> {
    plan:      &'a DayPlan,
    directory: &'a Directory,
    roster:    &'a mut Roster,
    tracker:   &'a mut TaskDoneTracker,
    rng:       &'a mut PhaseRng,
    events:    &'a mut Vec<RosterEvent>,
    slot:      Slot,
    available: Vec<EmployeeId>,
}

impl<'a> SlotPass<'a> {
    /// Available = on shift at `slot` and not already in any bucket there.
    fn new(
        plan: &'a DayPlan,
        directory: &'a Directory,
        roster: &'a mut Roster,
        tracker: &'a mut TaskDoneTracker,
        rng: &'a mut PhaseRng,
        events: &'a mut Vec<RosterEvent>,
        slot: Slot,
    ) -> Self {
        let available = directory
            .employees()
            .iter()
            .filter(|e| e.shift.contains(slot))
            .filter(|e| !roster.is_assigned(slot, &e.name))
            .map(|e| e.name.clone())
            .collect();
        Self { plan, directory, roster, tracker, rng, events, slot, available }
    }

    fn run(mut self) {
        self.assign_hurdles();
        for task in CsTask::ORDER {
            self.fill_task(task);
        }
        self.assign_departments();
        self.check_duplicates();
    }

    fn assign_hurdles(&mut self) {
        let directory = self.directory;
        let slot = self.slot;
        let starting: Vec<EmployeeId> = self
            .available
            .iter()
            .filter(|name| directory.get(name).is_some_and(|e| e.shift.start == slot))
            .cloned()
            .collect();

        for name in starting {
            self.roster.assign(slot, Bucket::Hurdle, &name);
            self.available.retain(|e| *e != name);
            log::debug!("slot {slot}: {name} on opening duty");
            self.events.push(RosterEvent::HurdleAssigned { slot, employee: name });
        }
    }

    fn fill_task(&mut self, task: CsTask) {
        let slot = self.slot;
        let required = self.plan.required(task, slot);
        let covered = self.roster.count(slot, task.bucket());
        if covered >= required {
            return;
        }
        let needed = required - covered;

        let pool = self.eligible_pool(task);
        let mut candidates = self.tracker.not_done(&pool, task);
        if candidates.is_empty() {
            self.reset_tracker(task, ResetReason::NoCandidates);
            candidates = self.tracker.not_done(&pool, task);
        }
        if candidates.is_empty() {
            log::debug!("slot {slot}: nobody eligible for {}", task.label());
            return;
        }

        let selected: Vec<EmployeeId> = match task {
            CsTask::Register => self.select_register(&pool, candidates, needed),
            CsTask::FittingRoom | CsTask::Greeter => {
                self.rng.choose(&candidates).cloned().into_iter().collect()
            }
        };
        log::debug!("slot {slot}: selected {selected:?} for {}", task.label());

        for name in &selected {
            self.apply_block(name, task);
        }

        let threshold = self.plan.assignment.fairness_reset_threshold;
        if self.tracker.mark_done(&selected, task, threshold) {
            log::debug!("slot {slot}: {} rotation exhausted, clearing done flags", task.label());
            self.events.push(RosterEvent::TrackerReset {
                slot,
                task,
                reason: ResetReason::PoolExhausted,
            });
        }
    }

    /// Available employees allowed to take `task` at this slot.
    fn eligible_pool(&mut self, task: CsTask) -> Vec<EmployeeId> {
        match task {
            CsTask::FittingRoom => {
                let floor = self.pool_where(|d| {
                    d.department.is_merchandise_floor() && !d.department.is_management()
                });
                if !floor.is_empty() {
                    return floor;
                }
                let fallback = self.pool_where(|d| !d.department.is_management());
                if !fallback.is_empty() {
                    log::debug!("slot {}: no floor staff for FR, widening pool", self.slot);
                    self.events.push(RosterEvent::FittingRoomFallback { slot: self.slot });
                }
                fallback
            }
            CsTask::Greeter => self.pool_where(|d| !d.department.is_management()),
            CsTask::Register => self.pool_where(|d| !d.department.is_admin()),
        }
    }

    fn pool_where(&self, allowed: impl Fn(&Employee) -> bool) -> Vec<EmployeeId> {
        let guard = self.plan.assignment.shift_end_guard.map(i32::from);
        let slot = i32::from(self.slot);
        self.available
            .iter()
            .filter_map(|name| self.directory.get(name))
            .filter(|e| allowed(*e))
            .filter(|e| guard.map_or(true, |g| i32::from(e.shift.last_slot()) - slot > g))
            .map(|e| e.name.clone())
            .collect()
    }

    fn select_register(
        &mut self,
        pool: &[EmployeeId],
        mut candidates: Vec<EmployeeId>,
        needed: usize,
    ) -> Vec<EmployeeId> {
        if candidates.len() < needed {
            self.reset_tracker(CsTask::Register, ResetReason::RegisterShort);
            candidates = self.tracker.not_done(pool, CsTask::Register);
        }
        if candidates.len() >= needed {
            return self.rng.sample(&candidates, needed);
        }

        // Last resort: top up from whoever worked the register last slot.
        // No shift check here; the block below skips slots they cannot take.
        let previous: Vec<EmployeeId> = self
            .slot
            .checked_sub(1)
            .map(|prev| self.roster.bucket(prev, Bucket::Register).to_vec())
            .unwrap_or_default();
        let borrowed = self.rng.sample(&previous, needed - candidates.len());

        let mut selected = candidates;
        selected.extend(borrowed.iter().cloned());
        log::warn!(
            "slot {}: register needs {needed}, selected {} ({} borrowed from previous slot)",
            self.slot,
            selected.len(),
            borrowed.len()
        );
        self.events.push(RosterEvent::RegisterShortage {
            slot: self.slot,
            needed,
            selected: selected.len(),
            borrowed,
        });
        selected
    }

    fn reset_tracker(&mut self, task: CsTask, reason: ResetReason) {
        self.tracker.reset(task);
        log::debug!("slot {}: reset {} tracker ({reason:?})", self.slot, task.label());
        self.events.push(RosterEvent::TrackerReset { slot: self.slot, task, reason });
    }

    /// Hold `name` on `task` from this slot for a block of slots.
    ///
    /// The block stretches to the shift end or store close when it would
    /// otherwise stop within `block_tolerance` slots of it, and otherwise
    /// runs up to the employee's next 40-minute break inside the lookahead.
    fn apply_block(&mut self, name: &str, task: CsTask) {
        let directory = self.directory;
        let plan = self.plan;
        let Some(employee) = directory.get(name) else {
            return;
        };
        let (Some(opening), Some(closing)) = (self.roster.opening_slot(), self.roster.closing_slot())
        else {
            return;
        };
        let policy = &plan.assignment;

        let mut block = i32::from(policy.block_size);
        if self.slot == opening && plan.opens_on_half_hour {
            if let Some(opening_block) = policy.opening_block_size {
                block = i32::from(opening_block);
            }
        }

        let slot = i32::from(self.slot);
        let tolerance = i32::from(policy.block_tolerance);
        let shift_last = i32::from(employee.shift.last_slot());
        let closing = i32::from(closing);

        if shift_last - (slot + block) < tolerance {
            block = shift_last - slot + 1;
        } else if closing - (slot + block) < tolerance {
            block = closing - slot + 1;
        } else if let Some(break_slot) = self.upcoming_break(name) {
            block = i32::from(break_slot) - slot;
        }
        if block <= 0 {
            return;
        }

        let bucket = task.bucket();
        for offset in 0..block {
            let next = self.slot + offset as Slot;
            if !self.roster.contains_slot(next) || !employee.shift.contains(next) {
                continue;
            }
            if let Some(held) = self.roster.bucket_of(next, name) {
                log::warn!(
                    "slot {next}: {name} already assigned to {held}, skipping {}",
                    task.label()
                );
                self.events.push(RosterEvent::BlockConflict {
                    slot:     next,
                    employee: name.to_string(),
                    task,
                    held:     held.label().to_string(),
                });
                continue;
            }
            if self.roster.count(next, bucket) >= plan.required(task, next) {
                continue;
            }
            self.roster.assign(next, bucket, name);
            if next == self.slot {
                self.available.retain(|e| e != name);
            }
        }
    }

    /// Nearest slot within the lookahead where `name` is on a 40-minute break.
    fn upcoming_break(&self, name: &str) -> Option<Slot> {
        let lookahead = self.plan.assignment.break_lookahead?;
        (1..lookahead)
            .map(|i| self.slot + i)
            .find(|s| self.roster.bucket(*s, Bucket::Break40).iter().any(|e| e == name))
    }

    fn assign_departments(&mut self) {
        let directory = self.directory;
        for name in std::mem::take(&mut self.available) {
            let Some(employee) = directory.get(&name) else {
                continue;
            };
            match employee.department.department() {
                Some(department) => {
                    self.roster.assign(self.slot, Bucket::Department(department), &name);
                }
                None => log::debug!(
                    "slot {}: {name} has no roster bucket for department '{}'",
                    self.slot,
                    employee.department.as_str()
                ),
            }
        }
    }

    fn check_duplicates(&mut self) {
        let duplicates = self.roster.duplicates(self.slot);
        if duplicates.is_empty() {
            return;
        }
        log::warn!("slot {}: duplicate assignment {duplicates:?}", self.slot);
        self.events.push(RosterEvent::DuplicateAssignment {
            slot:      self.slot,
            employees: duplicates,
        });
    }
}
