//! Weekly time slots and the slot universe.
//!
//! A [`TimeSlot`] is a (day, period) cell of the weekly grid, optionally
//! pinned to a concrete calendar date and optionally flagged as locked.
//! The [`SlotGrid`] enumerates every slot a class may occupy.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// The five teaching days, Monday through Friday.
    pub const WEEKDAYS: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// All seven days.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];
}

/// One cell of the weekly timetable: a day and a period index.
///
/// `date` is an optional epoch-day number (days since 1970-01-01) pinning
/// the slot to a concrete date; `is_fixed` marks a locked assignment that
/// re-optimization must not move. Neither field has a default role in
/// equality-derive comparisons beyond structural equality — occupancy
/// identity is [`same_slot`](TimeSlot::same_slot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeSlot {
    pub day: Day,
    pub period: u32,
    pub date: Option<i64>,
    pub is_fixed: bool,
}

impl TimeSlot {
    /// Creates a symbolic (day, period) slot with no date and not locked.
    pub fn new(day: Day, period: u32) -> Self {
        Self {
            day,
            period,
            date: None,
            is_fixed: false,
        }
    }

    /// Pins the slot to a concrete date (epoch days).
    pub fn with_date(mut self, epoch_day: i64) -> Self {
        self.date = Some(epoch_day);
        self
    }

    /// Marks the slot as locked against re-optimization.
    pub fn fixed(mut self) -> Self {
        self.is_fixed = true;
        self
    }

    /// Occupancy identity.
    ///
    /// When both slots carry a date, the exact date plus period determine
    /// identity (date comparison takes precedence over the symbolic day);
    /// otherwise identity is (day, period). The `is_fixed` flag never
    /// participates.
    pub fn same_slot(&self, other: &TimeSlot) -> bool {
        match (self.date, other.date) {
            (Some(a), Some(b)) => a == b && self.period == other.period,
            _ => self.day == other.day && self.period == other.period,
        }
    }
}

/// The universe of slots a class may occupy: a set of days crossed with a
/// fixed number of periods per day.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotGrid {
    pub days: Vec<Day>,
    pub periods_per_day: u32,
}

impl SlotGrid {
    /// Creates a grid over the given days and period count.
    pub fn new(days: Vec<Day>, periods_per_day: u32) -> Self {
        Self {
            days,
            periods_per_day,
        }
    }

    /// The standard teaching week: Monday–Friday, `periods` per day.
    pub fn weekdays(periods: u32) -> Self {
        Self::new(Day::WEEKDAYS.to_vec(), periods)
    }

    /// Total number of slots in the grid.
    pub fn slot_count(&self) -> usize {
        self.days.len() * self.periods_per_day as usize
    }

    /// Enumerates every slot, day-major, period-minor. Periods are 1-based.
    pub fn slots(&self) -> Vec<TimeSlot> {
        let mut out = Vec::with_capacity(self.slot_count());
        for &day in &self.days {
            for period in 1..=self.periods_per_day {
                out.push(TimeSlot::new(day, period));
            }
        }
        out
    }

    /// Whether the grid contains a slot with this (day, period).
    pub fn contains(&self, slot: &TimeSlot) -> bool {
        self.days.contains(&slot.day)
            && slot.period >= 1
            && slot.period <= self.periods_per_day
    }
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self::weekdays(6)
    }
}
