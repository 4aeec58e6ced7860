//! Phase trait and the per-day context phases work on.
//!
//! RULE: Every generation step implements RosterPhase.
//! The engine runs registered phases once per day, in registration order.
//! Execution order is fixed and documented in engine.rs.

use crate::{
    config::DayPlan,
    directory::Directory,
    error::RosterResult,
    event::RosterEvent,
    rng::PhaseRng,
    roster::Roster,
};

/// Everything a phase may read, plus the roster it mutates.
pub struct DayContext<'a> {
    pub plan:      &'a DayPlan,
    pub directory: &'a Directory,
    pub roster:    Roster,
}

/// The contract every phase must fulfill.
pub trait RosterPhase {
    /// Unique stable name for this phase.
    fn name(&self) -> &'static str;

    /// Called once per generated day by the engine.
    ///
    /// - `day`: the day's plan, directory and the roster so far
    /// - `rng`: this phase's deterministic RNG stream
    ///
    /// Returns the diagnostic events the phase produced.
    fn run(&mut self, day: &mut DayContext<'_>, rng: &mut PhaseRng) -> RosterResult<Vec<RosterEvent>>;
}
