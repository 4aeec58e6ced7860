//! Input validation: everything the engine cannot schedule around is a
//! hard error before generation starts.

use roster_core::{
    config::RosterConfig,
    directory::{Directory, EmployeeRecord, WeeklyAvailability},
    engine::RosterEngine,
    error::RosterError,
};

fn record(name: &str, start: &str, end: &str, department: &str) -> EmployeeRecord {
    EmployeeRecord {
        name:       name.into(),
        start:      start.into(),
        end:        end.into(),
        department: department.into(),
        hours:      None,
    }
}

#[test]
fn duplicate_names_are_rejected() {
    let err = Directory::from_records(vec![
        record("Ana", "09:30", "18:00", "CS"),
        record("Ana", "12:00", "18:00", "HH"),
    ])
    .unwrap_err();
    assert!(matches!(err, RosterError::DuplicateEmployee { employee } if employee == "Ana"));
}

#[test]
fn missing_department_is_rejected() {
    let err = Directory::from_records(vec![record("Ana", "09:30", "18:00", "  ")]).unwrap_err();
    assert!(matches!(err, RosterError::MissingDepartment { .. }));
}

#[test]
fn shift_must_end_after_it_starts() {
    let backwards = Directory::from_records(vec![record("Ana", "18:00", "09:30", "CS")]).unwrap_err();
    assert!(matches!(backwards, RosterError::InvalidShift { start: 72, end: 38, .. }));

    let empty = Directory::from_records(vec![record("Ana", "12:00", "12:10", "CS")]).unwrap_err();
    assert!(matches!(empty, RosterError::InvalidShift { .. }));
}

#[test]
fn malformed_clock_times_are_rejected() {
    for bad in ["9.30", "25:00", "noon", ""] {
        let err = Directory::from_records(vec![record("Ana", bad, "18:00", "CS")]).unwrap_err();
        assert!(matches!(err, RosterError::InvalidTime { .. }), "{bad:?} accepted");
    }
}

#[test]
fn unknown_day_is_rejected_by_the_engine() {
    let directory = Directory::from_records(vec![record("Ana", "09:30", "18:00", "CS")]).unwrap();
    let err = RosterEngine::build(RosterConfig::standard(), 1)
        .generate("Monday", &directory)
        .unwrap_err();
    assert!(matches!(err, RosterError::UnknownDay { day } if day == "Monday"));
}

#[test]
fn weekly_sheet_skips_days_off() {
    let sheet = WeeklyAvailability::from_json(
        r#"{"employees": [
            {"name": "Ana", "department": "M", "shifts": {"M": "09:30-18:00", "T": ""}},
            {"name": "Ben", "department": "Stat", "shifts": {"M": "12:00-18:00"}, "hours": {"M": 5.5}},
            {"name": "Cy",  "department": "HH", "shifts": {"T": "09:30-14:00"}}
        ]}"#,
    )
    .unwrap();

    let monday = sheet.records_for_day("M").unwrap();
    assert_eq!(monday.len(), 2);
    assert_eq!(monday[0].start, "09:30");
    assert_eq!(monday[1].hours, Some(5.5));

    let tuesday = sheet.directory_for_day("T").unwrap();
    assert_eq!(tuesday.len(), 1);
    assert_eq!(tuesday.get("Cy").unwrap().hours, 4.5);

    let directory = sheet.directory_for_day("M").unwrap();
    assert_eq!(directory.get("Ana").unwrap().department.as_str(), "M's");
    assert_eq!(directory.get("Ben").unwrap().department.as_str(), "Stat.");
    assert!(sheet.records_for_day("Su").unwrap().is_empty());
}

#[test]
fn weekly_sheet_shift_needs_a_dash() {
    let sheet = WeeklyAvailability::from_json(
        r#"{"employees": [{"name": "Ana", "department": "CS", "shifts": {"M": "09:30 18:00"}}]}"#,
    )
    .unwrap();
    assert!(matches!(
        sheet.records_for_day("M"),
        Err(RosterError::MalformedShift { .. })
    ));
}

#[test]
fn malformed_json_is_a_serialization_error() {
    assert!(matches!(
        WeeklyAvailability::from_json("{ not json"),
        Err(RosterError::Serialization(_))
    ));
    assert!(matches!(
        RosterConfig::from_json("[]"),
        Err(RosterError::Serialization(_))
    ));
}

#[test]
fn shipped_data_files_load() {
    let policy = RosterConfig::from_json(include_str!("../../data/store_policy.json")).unwrap();
    assert_eq!(policy.days.len(), 7);
    assert_eq!(policy.assignment.opening_block_size, Some(6));

    let sheet = WeeklyAvailability::from_json(include_str!("../../data/weekly_availability.json")).unwrap();
    for day in ["M", "T", "W", "Th", "F", "Sa", "Su"] {
        assert!(!sheet.directory_for_day(day).unwrap().is_empty(), "nobody on {day}");
    }
}
