//! roster-core: one-day staff roster generation for a retail store.
//!
//! Given the day's store policy and the employees on shift, the engine
//! assigns every employee to a bucket in every 15-minute slot the store
//! is open: customer-service tasks, opening duty, breaks, or their own
//! department's floor work. See `engine` for the phase order.

pub mod assignment;
pub mod breaks;
pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod event;
pub mod phase;
pub mod report;
pub mod rng;
pub mod roster;
pub mod slot;
pub mod snapshot;
pub mod ten_minute;
pub mod tracker;
pub mod types;
