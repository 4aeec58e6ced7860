//! Roster properties that must hold for every day of a staffed week,
//! across several seeds.

use roster_core::{
    config::{RosterConfig, ShiftCategory},
    directory::{Directory, WeeklyAvailability},
    engine::{DayRoster, RosterEngine},
    event::RosterEvent,
    roster::{Bucket, CsTask},
};
use std::collections::BTreeMap;

const SHEET: &str = include_str!("../../data/weekly_availability.json");
const DAYS: [&str; 7] = ["M", "T", "W", "Th", "F", "Sa", "Su"];
const SEEDS: [u64; 3] = [1, 42, 0xC0FFEE];

fn week() -> impl Iterator<Item = (Directory, DayRoster)> {
    let sheet = WeeklyAvailability::from_json(SHEET).unwrap();
    DAYS.into_iter().flat_map(move |day| {
        let sheet = sheet.clone();
        SEEDS.into_iter().map(move |seed| {
            let directory = sheet.directory_for_day(day).unwrap();
            let roster = RosterEngine::build(RosterConfig::standard(), seed)
                .generate(day, &directory)
                .unwrap();
            (directory, roster)
        })
    })
}

#[test]
fn duplicates_only_where_the_engine_reported_them() {
    for (_, day) in week() {
        let found: BTreeMap<u16, Vec<String>> = day
            .roster
            .slots()
            .map(|s| (s, day.roster.duplicates(s)))
            .filter(|(_, d)| !d.is_empty())
            .collect();
        let reported: BTreeMap<u16, Vec<String>> = day
            .events
            .iter()
            .filter_map(|e| match &e.event {
                RosterEvent::DuplicateAssignment { slot, employees } => Some((*slot, employees.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(found, reported, "day {} seed {}", day.day, day.seed);
    }
}

#[test]
fn forty_minute_breaks_follow_shift_length() {
    let config = RosterConfig::standard();
    for (directory, day) in week() {
        let plan = config.plan_for(&day.day).unwrap();
        for employee in directory.employees() {
            let category = plan.breaks.category_of(employee.shift.start);
            let window = plan.breaks.windows(category);
            let expected = if employee.hours <= plan.breaks.long_shift_hours
                || (category == ShiftCategory::Late && !plan.late_breaks)
            {
                0
            } else {
                window.first.len()
            };
            let actual = day
                .roster
                .entries_for(&employee.name)
                .iter()
                .filter(|(_, b)| *b == Bucket::Break40)
                .count();
            assert_eq!(actual, expected, "{} on {} seed {}", employee.name, day.day, day.seed);
        }
    }
}

#[test]
fn at_most_one_ten_minute_break_each() {
    for (directory, day) in week() {
        for employee in directory.employees() {
            let tens = day
                .roster
                .entries_for(&employee.name)
                .iter()
                .filter(|(_, b)| *b == Bucket::Break10)
                .count();
            assert!(tens <= 1, "{} has {tens} ten-minute breaks on {}", employee.name, day.day);
        }
    }
}

#[test]
fn nobody_is_rostered_off_shift() {
    for (directory, day) in week() {
        for employee in directory.employees() {
            for (slot, bucket) in day.roster.entries_for(&employee.name) {
                assert!(
                    employee.shift.contains(slot),
                    "{} in {bucket} at {slot} outside shift on {}",
                    employee.name,
                    day.day
                );
            }
        }
    }
}

#[test]
fn everyone_on_shift_is_somewhere_every_open_slot() {
    for (directory, day) in week() {
        for slot in day.roster.slots() {
            for employee in directory.employees().iter().filter(|e| e.shift.contains(slot)) {
                assert!(
                    day.roster.is_assigned(slot, &employee.name),
                    "{} unassigned at {slot} on {}",
                    employee.name,
                    day.day
                );
            }
        }
    }
}

#[test]
fn task_headcounts_never_exceed_requirements() {
    let config = RosterConfig::standard();
    for (_, day) in week() {
        let plan = config.plan_for(&day.day).unwrap();
        for slot in day.roster.slots() {
            for task in CsTask::ORDER {
                assert!(
                    day.roster.count(slot, task.bucket()) <= plan.required(task, slot),
                    "{} over-staffed at {slot} on {}",
                    task.label(),
                    day.day
                );
            }
        }
    }
}

#[test]
fn register_is_covered_whenever_enough_staff_are_free() {
    let config = RosterConfig::standard();
    for (directory, day) in week() {
        let plan = config.plan_for(&day.day).unwrap();
        let guard = plan.assignment.shift_end_guard.unwrap_or(0);

        for slot in day.roster.slots() {
            // Staff who could work the register here, before FR and GR take theirs.
            let free = directory
                .employees()
                .iter()
                .filter(|e| e.shift.contains(slot))
                .filter(|e| !e.department.is_admin())
                .filter(|e| e.shift.last_slot() - slot > guard)
                .filter(|e| {
                    !matches!(
                        day.roster.bucket_of(slot, &e.name),
                        Some(Bucket::Hurdle | Bucket::Break40 | Bucket::Break10)
                    )
                })
                .count();
            let required = plan.required(CsTask::Register, slot);
            if free >= required + 2 {
                assert!(
                    day.roster.count(slot, Bucket::Register) >= required,
                    "register short at {slot} on {} seed {} with {free} free",
                    day.day,
                    day.seed
                );
            }
        }
    }
}
