//! The roster: slot → bucket → ordered employee list.
//!
//! Created once per day with every open slot pre-populated with an empty
//! bucket for every task, break kind and department. The engine's phases
//! mutate it in place; it is the only mutable state of a generation run.
//!
//! Within one slot an employee should sit in at most one bucket. The
//! container does not enforce that: phases check before writing, and the
//! per-slot consistency check reports what slipped through.

use crate::{
    directory::Department,
    slot::ShiftRange,
    types::{EmployeeId, Slot},
};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Customer-service tasks, in the order they are filled every slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CsTask {
    #[serde(rename = "FR")]
    FittingRoom,
    #[serde(rename = "GR")]
    Greeter,
    #[serde(rename = "R")]
    Register,
}

impl CsTask {
    pub const ORDER: [CsTask; 3] = [Self::FittingRoom, Self::Greeter, Self::Register];

    pub fn bucket(&self) -> Bucket {
        match self {
            Self::FittingRoom => Bucket::FittingRoom,
            Self::Greeter => Bucket::Greeter,
            Self::Register => Bucket::Register,
        }
    }

    pub fn label(&self) -> &'static str {
        self.bucket().label()
    }
}

/// A roster column: a task, a break kind, or a department's floor work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    FittingRoom,
    Greeter,
    Register,
    /// Opening duty, one slot at the start of a shift.
    Hurdle,
    Break40,
    Break10,
    Department(Department),
}

impl Bucket {
    pub fn all() -> impl Iterator<Item = Bucket> {
        [
            Self::FittingRoom,
            Self::Greeter,
            Self::Register,
            Self::Hurdle,
            Self::Break40,
            Self::Break10,
        ]
        .into_iter()
        .chain(Department::ALL.into_iter().map(Self::Department))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FittingRoom => "FR",
            Self::Greeter => "GR",
            Self::Register => "R",
            Self::Hurdle => "H",
            Self::Break40 => "40",
            Self::Break10 => "10",
            Self::Department(d) => d.label(),
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, Self::Break40 | Self::Break10)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Buckets are map keys in the exported roster, so they serialize as labels.
impl Serialize for Bucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SlotBuckets {
    buckets: BTreeMap<Bucket, Vec<EmployeeId>>,
}

impl SlotBuckets {
    fn empty() -> Self {
        Self {
            buckets: Bucket::all().map(|b| (b, Vec::new())).collect(),
        }
    }

    pub fn get(&self, bucket: Bucket) -> &[EmployeeId] {
        self.buckets.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &[EmployeeId])> {
        self.buckets.iter().map(|(b, emps)| (*b, emps.as_slice()))
    }

    /// First bucket holding `employee`, in bucket order.
    pub fn bucket_of(&self, employee: &str) -> Option<Bucket> {
        self.buckets
            .iter()
            .find(|(_, emps)| emps.iter().any(|e| e == employee))
            .map(|(b, _)| *b)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    slots: BTreeMap<Slot, SlotBuckets>,
}

impl Roster {
    /// An empty roster covering every slot the store is open.
    pub fn new(store: ShiftRange) -> Self {
        Self {
            slots: store.slots().map(|s| (s, SlotBuckets::empty())).collect(),
        }
    }

    /// Open slots in increasing order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.slots.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &SlotBuckets)> {
        self.slots.iter().map(|(s, b)| (*s, b))
    }

    pub fn slot(&self, slot: Slot) -> Option<&SlotBuckets> {
        self.slots.get(&slot)
    }

    pub fn contains_slot(&self, slot: Slot) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn opening_slot(&self) -> Option<Slot> {
        self.slots.keys().next().copied()
    }

    /// Last open slot of the day.
    pub fn closing_slot(&self) -> Option<Slot> {
        self.slots.keys().next_back().copied()
    }

    pub fn bucket(&self, slot: Slot, bucket: Bucket) -> &[EmployeeId] {
        self.slots.get(&slot).map(|b| b.get(bucket)).unwrap_or(&[])
    }

    pub fn count(&self, slot: Slot, bucket: Bucket) -> usize {
        self.bucket(slot, bucket).len()
    }

    /// Append `employee` to a bucket. Returns false when the slot is not open.
    pub fn assign(&mut self, slot: Slot, bucket: Bucket, employee: &str) -> bool {
        match self.slots.get_mut(&slot) {
            Some(buckets) => {
                buckets
                    .buckets
                    .entry(bucket)
                    .or_default()
                    .push(employee.to_string());
                true
            }
            None => false,
        }
    }

    pub fn bucket_of(&self, slot: Slot, employee: &str) -> Option<Bucket> {
        self.slots.get(&slot).and_then(|b| b.bucket_of(employee))
    }

    pub fn is_assigned(&self, slot: Slot, employee: &str) -> bool {
        self.bucket_of(slot, employee).is_some()
    }

    /// Remove `employee` from every bucket of `slot`; returns the buckets it left.
    pub fn remove_employee(&mut self, slot: Slot, employee: &str) -> Vec<Bucket> {
        let Some(buckets) = self.slots.get_mut(&slot) else {
            return Vec::new();
        };
        let mut left = Vec::new();
        for (bucket, emps) in buckets.buckets.iter_mut() {
            let before = emps.len();
            emps.retain(|e| e != employee);
            if emps.len() != before {
                left.push(*bucket);
            }
        }
        left
    }

    /// Employees appearing more than once across the buckets of `slot`, sorted.
    pub fn duplicates(&self, slot: Slot) -> Vec<EmployeeId> {
        let Some(buckets) = self.slots.get(&slot) else {
            return Vec::new();
        };
        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        for (_, emps) in buckets.iter() {
            for e in emps {
                *seen.entry(e.as_str()).or_default() += 1;
            }
        }
        seen.into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(e, _)| e.to_string())
            .collect()
    }

    /// Every (slot, bucket) entry for one employee, in slot order.
    pub fn entries_for(&self, employee: &str) -> Vec<(Slot, Bucket)> {
        self.slots
            .iter()
            .flat_map(|(slot, buckets)| {
                buckets
                    .iter()
                    .filter(|(_, emps)| emps.iter().any(|e| e == employee))
                    .map(|(b, _)| (*slot, b))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::new(ShiftRange::new(38, 42))
    }

    #[test]
    fn every_slot_starts_with_every_bucket_empty() {
        let r = roster();
        assert_eq!(r.slots().collect::<Vec<_>>(), vec![38, 39, 40, 41]);
        let buckets = r.slot(38).unwrap();
        assert_eq!(buckets.iter().count(), 18);
        assert!(buckets.iter().all(|(_, emps)| emps.is_empty()));
        assert_eq!(r.opening_slot(), Some(38));
        assert_eq!(r.closing_slot(), Some(41));
    }

    #[test]
    fn assign_outside_open_hours_is_refused() {
        let mut r = roster();
        assert!(!r.assign(42, Bucket::Register, "Ana"));
        assert!(r.assign(41, Bucket::Register, "Ana"));
        assert_eq!(r.bucket(41, Bucket::Register), ["Ana".to_string()]);
    }

    #[test]
    fn remove_and_lookup() {
        let mut r = roster();
        r.assign(39, Bucket::Department(Department::HomeHardware), "Ben");
        assert_eq!(
            r.bucket_of(39, "Ben"),
            Some(Bucket::Department(Department::HomeHardware))
        );
        let left = r.remove_employee(39, "Ben");
        assert_eq!(left, vec![Bucket::Department(Department::HomeHardware)]);
        assert!(!r.is_assigned(39, "Ben"));
    }

    #[test]
    fn duplicates_are_reported_not_fixed() {
        let mut r = roster();
        r.assign(40, Bucket::Register, "Ana");
        r.assign(40, Bucket::Break40, "Ana");
        r.assign(40, Bucket::Greeter, "Ben");
        assert_eq!(r.duplicates(40), vec!["Ana".to_string()]);
        assert_eq!(r.count(40, Bucket::Register), 1);
        assert_eq!(r.count(40, Bucket::Break40), 1);
    }

    #[test]
    fn serializes_with_bucket_labels() {
        let mut r = Roster::new(ShiftRange::new(40, 41));
        r.assign(40, Bucket::Department(Department::Mens), "Cy");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["40"]["M's"][0], "Cy");
        assert!(json["40"]["FR"].as_array().unwrap().is_empty());
    }
}
