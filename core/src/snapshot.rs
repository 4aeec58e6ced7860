//! Snapshot serialization: a finished day's roster to JSON.
//!
//! The snapshot is what the export side consumes. It carries the seed so
//! a roster can be regenerated exactly from the same policy and directory.

use crate::{
    error::RosterResult,
    roster::Roster,
    types::DayKey,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RosterSnapshot {
    pub day:    DayKey,
    pub seed:   u64,
    pub roster: Roster,
}

impl RosterSnapshot {
    pub fn to_json(&self) -> RosterResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> RosterResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
