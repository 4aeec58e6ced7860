//! Employee/shift directory: the day's on-duty employees, read-only to the engine.
//!
//! Records arrive from the availability sheet already split per day.
//! Building a `Directory` is the single validation point: anything the
//! engine cannot schedule around (bad shift, no department, duplicate
//! name) fails here instead of producing a partial roster.

use crate::{
    error::{RosterError, RosterResult},
    slot::{slot_range, ShiftRange},
    types::{DayKey, EmployeeId, SLOT_MINUTES},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Known department and role codes, in roster bucket order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Department {
    CustomerService,
    HomeHardware,
    Ladies,
    Mens,
    HealthBeauty,
    Stationery,
    Accessories,
    /// Coded "F" on the store sheet.
    F,
    Supervisor,
    AssistantManager,
    StoreManager,
    Admin,
}

impl Department {
    pub const ALL: [Department; 12] = [
        Self::CustomerService,
        Self::HomeHardware,
        Self::Ladies,
        Self::Mens,
        Self::HealthBeauty,
        Self::Stationery,
        Self::Accessories,
        Self::F,
        Self::Supervisor,
        Self::AssistantManager,
        Self::StoreManager,
        Self::Admin,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::CustomerService => "CS",
            Self::HomeHardware => "HH",
            Self::Ladies => "L's",
            Self::Mens => "M's",
            Self::HealthBeauty => "H&B",
            Self::Stationery => "Stat.",
            Self::Accessories => "Acc.",
            Self::F => "F",
            Self::Supervisor => "SPV",
            Self::AssistantManager => "ASM",
            Self::StoreManager => "SM",
            Self::Admin => "ADM",
        }
    }

    /// Look up a raw sheet code, normalizing short forms first.
    pub fn parse(code: &str) -> Option<Self> {
        let normalized = normalize_department_code(code);
        Self::ALL.into_iter().find(|d| d.label() == normalized)
    }

    pub fn is_management(&self) -> bool {
        matches!(
            self,
            Self::Supervisor | Self::AssistantManager | Self::StoreManager | Self::Admin
        )
    }

    /// Departments that staff the fitting room first.
    pub fn is_merchandise_floor(&self) -> bool {
        matches!(self, Self::Mens | Self::Ladies | Self::Accessories)
    }
}

/// Map the short codes used on the availability sheet to bucket labels.
/// Codes that are already labels (or unknown) pass through trimmed.
pub fn normalize_department_code(code: &str) -> &str {
    match code.trim() {
        "M" => "M's",
        "L" => "L's",
        "Acc" => "Acc.",
        "Stat" => "Stat.",
        other => other,
    }
}

/// An employee's home department as given, known or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentCode {
    Known(Department),
    /// A code with no roster bucket. Still schedulable for tasks,
    /// skipped by the department fallback.
    Other(String),
}

impl DepartmentCode {
    pub fn parse(raw: &str) -> Self {
        match Department::parse(raw) {
            Some(d) => Self::Known(d),
            None => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn department(&self) -> Option<Department> {
        match self {
            Self::Known(d) => Some(*d),
            Self::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(d) => d.label(),
            Self::Other(code) => code,
        }
    }

    pub fn is_management(&self) -> bool {
        self.department().is_some_and(|d| d.is_management())
    }

    pub fn is_admin(&self) -> bool {
        self.department() == Some(Department::Admin)
    }

    pub fn is_merchandise_floor(&self) -> bool {
        self.department().is_some_and(|d| d.is_merchandise_floor())
    }
}

/// One employee's shift for the day, as supplied by the availability sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub name:       EmployeeId,
    pub start:      String,
    pub end:        String,
    pub department: String,
    /// Scheduled hours. Defaults to the shift length when absent.
    #[serde(default)]
    pub hours:      Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Employee {
    pub name:       EmployeeId,
    pub shift:      ShiftRange,
    pub department: DepartmentCode,
    pub hours:      f64,
}

/// The validated, ordered set of employees working one day.
/// Iteration order is input order and is part of the deterministic contract.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    employees: Vec<Employee>,
    index:     HashMap<EmployeeId, usize>,
}

impl Directory {
    pub fn from_records(records: Vec<EmployeeRecord>) -> RosterResult<Self> {
        let mut directory = Self::default();
        for record in records {
            directory.push(record)?;
        }
        Ok(directory)
    }

    fn push(&mut self, record: EmployeeRecord) -> RosterResult<()> {
        let name = record.name.trim().to_string();
        if self.index.contains_key(&name) {
            return Err(RosterError::DuplicateEmployee { employee: name });
        }
        if record.department.trim().is_empty() {
            return Err(RosterError::MissingDepartment { employee: name });
        }
        let shift = slot_range(&record.start, &record.end)?;
        if shift.is_empty() {
            return Err(RosterError::InvalidShift {
                employee: name,
                start:    shift.start,
                end:      shift.end,
            });
        }
        let hours = record
            .hours
            .unwrap_or(shift.len() as f64 * f64::from(SLOT_MINUTES) / 60.0);

        self.index.insert(name.clone(), self.employees.len());
        self.employees.push(Employee {
            name,
            shift,
            department: DepartmentCode::parse(&record.department),
            hours,
        });
        Ok(())
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn get(&self, name: &str) -> Option<&Employee> {
        self.index.get(name).map(|&i| &self.employees[i])
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

/// The weekly availability sheet: one row per employee, one shift string
/// ("HH:MM-HH:MM") per working day. Blank or missing days mean off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyAvailability {
    pub employees: Vec<WeeklyEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyEntry {
    pub name:       EmployeeId,
    pub department: String,
    #[serde(default)]
    pub shifts:     BTreeMap<DayKey, String>,
    #[serde(default)]
    pub hours:      BTreeMap<DayKey, f64>,
}

impl WeeklyAvailability {
    pub fn from_json(json: &str) -> RosterResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Records for everyone with a shift on `day`, in sheet order.
    pub fn records_for_day(&self, day: &str) -> RosterResult<Vec<EmployeeRecord>> {
        let mut records = Vec::new();
        for entry in &self.employees {
            let Some(shift) = entry.shifts.get(day).map(|s| s.trim()) else {
                continue;
            };
            if shift.is_empty() {
                continue;
            }
            let (start, end) = shift.split_once('-').ok_or_else(|| {
                RosterError::MalformedShift {
                    employee: entry.name.clone(),
                    value:    shift.to_string(),
                }
            })?;
            records.push(EmployeeRecord {
                name:       entry.name.clone(),
                start:      start.trim().to_string(),
                end:        end.trim().to_string(),
                department: entry.department.clone(),
                hours:      entry.hours.get(day).copied(),
            });
        }
        Ok(records)
    }

    pub fn directory_for_day(&self, day: &str) -> RosterResult<Directory> {
        Directory::from_records(self.records_for_day(day)?)
    }
}
