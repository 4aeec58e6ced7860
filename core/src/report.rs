//! Read-only views over a finished roster, for the runner's summary and
//! for whoever exports the roster onward.

use crate::{
    config::DayPlan,
    roster::{Bucket, CsTask, Roster},
    slot::slot_to_time,
    types::{EmployeeId, Slot},
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterShortfall {
    pub slot:     Slot,
    pub required: usize,
    pub staffed:  usize,
}

/// Where the roster fell below its per-slot headcounts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoverageSummary {
    /// Slots where a task had fewer people than required.
    pub uncovered:           BTreeMap<CsTask, Vec<Slot>>,
    pub register_shortfalls: Vec<RegisterShortfall>,
}

impl CoverageSummary {
    pub fn from_roster(roster: &Roster, plan: &DayPlan) -> Self {
        let mut summary = Self::default();
        for slot in roster.slots() {
            for task in CsTask::ORDER {
                let required = plan.required(task, slot);
                let staffed = roster.count(slot, task.bucket());
                if staffed >= required {
                    continue;
                }
                summary.uncovered.entry(task).or_default().push(slot);
                if task == CsTask::Register {
                    summary.register_shortfalls.push(RegisterShortfall { slot, required, staffed });
                }
            }
        }
        summary
    }

    pub fn is_fully_covered(&self) -> bool {
        self.uncovered.values().all(Vec::is_empty)
    }

    /// Human-readable lines, one per short task.
    pub fn lines(&self) -> Vec<String> {
        self.uncovered
            .iter()
            .filter(|(_, slots)| !slots.is_empty())
            .map(|(task, slots)| {
                let times: Vec<String> = slots.iter().map(|s| slot_to_time(*s)).collect();
                format!("{} short at {}", task.label(), times.join(", "))
            })
            .collect()
    }
}

/// A run of consecutive slots an employee spent in one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineBlock {
    pub start:  Slot,
    /// Exclusive.
    pub end:    Slot,
    pub bucket: Bucket,
}

pub fn employee_timeline(roster: &Roster, employee: &str) -> Vec<TimelineBlock> {
    let mut blocks: Vec<TimelineBlock> = Vec::new();
    for (slot, bucket) in roster.entries_for(employee) {
        match blocks.last_mut() {
            Some(last) if last.bucket == bucket && last.end == slot => last.end = slot + 1,
            _ => blocks.push(TimelineBlock { start: slot, end: slot + 1, bucket }),
        }
    }
    blocks
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub fitting_room: usize,
    pub greeter:      usize,
    pub register:     usize,
    pub on_break:     usize,
}

impl TaskCounts {
    pub fn total(&self) -> usize {
        self.fitting_room + self.greeter + self.register
    }
}

/// Slots spent on each customer-service task, and on break, per employee.
pub fn task_distribution(roster: &Roster) -> BTreeMap<EmployeeId, TaskCounts> {
    let mut counts: BTreeMap<EmployeeId, TaskCounts> = BTreeMap::new();
    for (_, buckets) in roster.iter() {
        for (bucket, employees) in buckets.iter() {
            for employee in employees {
                let entry = counts.entry(employee.clone()).or_default();
                match bucket {
                    Bucket::FittingRoom => entry.fitting_room += 1,
                    Bucket::Greeter => entry.greeter += 1,
                    Bucket::Register => entry.register += 1,
                    b if b.is_break() => entry.on_break += 1,
                    _ => {}
                }
            }
        }
    }
    counts
}
