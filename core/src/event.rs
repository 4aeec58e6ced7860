//! Diagnostic events emitted while a roster is generated.
//!
//! RULE: every soft degradation is logged AND recorded here.
//! The engine never repairs a roster after the fact; callers read the
//! event log to see exactly what it could not satisfy.

use crate::{
    config::ShiftCategory,
    roster::CsTask,
    types::{EmployeeId, Slot},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetReason {
    /// No eligible employee had the task still undone.
    NoCandidates,
    /// Fewer undone register candidates than the slot needs.
    RegisterShort,
    /// Too few employees left with the task undone after marking.
    PoolExhausted,
}

/// Every event emitted during generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RosterEvent {
    // ── Break scheduler ───────────────────────────
    BreakAssigned {
        employee: EmployeeId,
        category: ShiftCategory,
        start:    Slot,
        end:      Slot,
    },
    BreakBatchEmpty {
        category: ShiftCategory,
    },

    // ── Slot assignment ───────────────────────────
    HurdleAssigned {
        slot:     Slot,
        employee: EmployeeId,
    },
    TrackerReset {
        slot:   Slot,
        task:   CsTask,
        reason: ResetReason,
    },
    FittingRoomFallback {
        slot: Slot,
    },
    RegisterShortage {
        slot:     Slot,
        needed:   usize,
        selected: usize,
        borrowed: Vec<EmployeeId>,
    },
    BlockConflict {
        slot:     Slot,
        employee: EmployeeId,
        task:     CsTask,
        held:     String,
    },
    DuplicateAssignment {
        slot:      Slot,
        employees: Vec<EmployeeId>,
    },

    // ── 10-minute post-pass ───────────────────────
    TenMinuteBreakAssigned {
        slot:     Slot,
        employee: EmployeeId,
        from:     String,
    },
    TenMinuteBreakSkipped {
        employee: EmployeeId,
    },
}

impl RosterEvent {
    /// Stable name of the variant, matching its serialized `type` tag.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::BreakAssigned { .. }          => "break_assigned",
            Self::BreakBatchEmpty { .. }        => "break_batch_empty",
            Self::HurdleAssigned { .. }         => "hurdle_assigned",
            Self::TrackerReset { .. }           => "tracker_reset",
            Self::FittingRoomFallback { .. }    => "fitting_room_fallback",
            Self::RegisterShortage { .. }       => "register_shortage",
            Self::BlockConflict { .. }          => "block_conflict",
            Self::DuplicateAssignment { .. }    => "duplicate_assignment",
            Self::TenMinuteBreakAssigned { .. } => "ten_minute_break_assigned",
            Self::TenMinuteBreakSkipped { .. }  => "ten_minute_break_skipped",
        }
    }

    /// Events that mean the roster fell short of, or broke, a constraint.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::RegisterShortage { .. }
                | Self::BlockConflict { .. }
                | Self::DuplicateAssignment { .. }
        )
    }
}

/// One entry of a run's event log, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub phase:      String,
    pub event_type: String,
    pub event:      RosterEvent,
}
