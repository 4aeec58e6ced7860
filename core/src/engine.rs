//! The roster engine: builds one day's roster from policy and directory.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Breaks              40-minute windows (and coupled 10s)
//!   2. Slot assignment     hurdle, FR/GR/R quotas, department fallback
//!   3. Ten-minute breaks   post-pass over finished floor work
//!
//! RULES:
//!   - Phases execute in registration order, once per generated day.
//!   - The roster is owned by the run; no phase keeps state across days.
//!   - All randomness flows through the RngBank.
//!   - Every soft degradation is recorded in the event log.

use crate::{
    assignment::SlotAssignmentPhase,
    breaks::BreakPhase,
    config::RosterConfig,
    directory::Directory,
    error::RosterResult,
    event::EventLogEntry,
    phase::{DayContext, RosterPhase},
    rng::{PhaseSlot, RngBank},
    roster::Roster,
    snapshot::RosterSnapshot,
    ten_minute::TenMinuteBreakPhase,
    types::DayKey,
};

pub struct RosterEngine {
    pub rng_bank: RngBank,
    seed:         u64,
    config:       RosterConfig,
    phases:       Vec<(PhaseSlot, Box<dyn RosterPhase>)>,
}

/// A generated day: the roster plus everything the engine reported on the way.
#[derive(Debug, Clone)]
pub struct DayRoster {
    pub day:    DayKey,
    pub seed:   u64,
    pub roster: Roster,
    pub events: Vec<EventLogEntry>,
}

impl DayRoster {
    pub fn snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            day:    self.day.clone(),
            seed:   self.seed,
            roster: self.roster.clone(),
        }
    }

    /// Entries for constraints the engine could not satisfy.
    pub fn warnings(&self) -> impl Iterator<Item = &EventLogEntry> {
        self.events.iter().filter(|e| e.event.is_warning())
    }
}

impl RosterEngine {
    pub fn new(config: RosterConfig, seed: u64) -> Self {
        Self {
            rng_bank: RngBank::new(seed),
            seed,
            config,
            phases: Vec::new(),
        }
    }

    /// Build a fully wired engine with all phases registered.
    /// Call this instead of new() + manual register() calls.
    pub fn build(config: RosterConfig, seed: u64) -> Self {
        let mut engine = RosterEngine::new(config, seed);
        engine.register(PhaseSlot::Breaks, Box::new(BreakPhase));
        engine.register(PhaseSlot::SlotAssignment, Box::new(SlotAssignmentPhase));
        engine.register(PhaseSlot::TenMinuteBreaks, Box::new(TenMinuteBreakPhase));
        engine
    }

    /// Register a phase. Call in the documented execution order.
    pub fn register(&mut self, slot: PhaseSlot, phase: Box<dyn RosterPhase>) {
        self.phases.push((slot, phase));
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Generate the roster for `day`.
    ///
    /// Hard errors (unknown day, unusable store hours) abort before any
    /// phase runs. Everything else ends up in the returned event log.
    pub fn generate(&mut self, day: &str, directory: &Directory) -> RosterResult<DayRoster> {
        let plan = self.config.plan_for(day)?;
        log::info!(
            "generating roster for {day}: {} employees, slots {}..{}, seed {}",
            directory.len(),
            plan.store.start,
            plan.store.end,
            self.seed
        );

        let mut context = DayContext {
            plan: &plan,
            directory,
            roster: Roster::new(plan.store),
        };
        let mut events = Vec::new();

        for (slot, phase) in &mut self.phases {
            let mut rng = self.rng_bank.for_phase(*slot);
            let new_events = phase.run(&mut context, &mut rng)?;
            events.extend(new_events.into_iter().map(|event| EventLogEntry {
                phase:      phase.name().to_string(),
                event_type: event.event_type().to_string(),
                event,
            }));
        }

        let result = DayRoster {
            day:    plan.day.clone(),
            seed:   self.seed,
            roster: context.roster,
            events,
        };
        let warnings = result.warnings().count();
        if warnings > 0 {
            log::warn!("roster for {day} finished with {warnings} warnings");
        }
        Ok(result)
    }
}
