use crate::types::{EmployeeId, Slot};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown day key '{day}'")]
    UnknownDay { day: String },

    #[error("Invalid clock time '{value}': expected HH:MM")]
    InvalidTime { value: String },

    #[error("Invalid shift for '{employee}': end slot {end} is not after start slot {start}")]
    InvalidShift { employee: EmployeeId, start: Slot, end: Slot },

    #[error("Malformed shift '{value}' for '{employee}': expected HH:MM-HH:MM")]
    MalformedShift { employee: EmployeeId, value: String },

    #[error("Employee '{employee}' has no department code")]
    MissingDepartment { employee: EmployeeId },

    #[error("Employee '{employee}' listed more than once")]
    DuplicateEmployee { employee: EmployeeId },

    #[error("Store hours for day '{day}' close at or before opening")]
    InvalidStoreHours { day: String },

    #[error("Register coverage for day '{day}' has {actual} entries, store is open {expected} slots")]
    CoverageMismatch { day: String, expected: usize, actual: usize },
}

pub type RosterResult<T> = Result<T, RosterError>;
