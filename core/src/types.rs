//! Shared primitive types used across the whole roster engine.

/// One 15-minute unit of the day. Slot 0 = 00:00, slot 95 = 23:45.
pub type Slot = u16;

/// Employee identifier. Names are unique within one day's directory.
pub type EmployeeId = String;

/// Day-of-week key as used by the store policy ("M", "T", "W", "Th", "F", "Sa", "Su").
pub type DayKey = String;

/// Minutes covered by one slot.
pub const SLOT_MINUTES: u32 = 15;

/// Number of slots in a day.
pub const SLOTS_PER_DAY: Slot = 96;
