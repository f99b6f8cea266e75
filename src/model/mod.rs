//! Timetabling domain types.
//!
//! Plain value types consumed by the GA engine:
//!
//! - [`Day`] / [`TimeSlot`] / [`SlotGrid`]: the weekly slot universe
//! - [`Class`] / [`Roster`]: what must be scheduled, and where
//! - [`Assignment`] / [`Schedule`]: the engine's output shape
//!
//! Dates are integer epoch days (days since 1970-01-01); calendar
//! bookkeeping (week splitting, formatting) belongs to collaborators.

mod class;
mod schedule;
mod time_slot;

pub use class::{Class, Roster};
pub use schedule::{Assignment, Schedule};
pub use time_slot::{Day, SlotGrid, TimeSlot};
