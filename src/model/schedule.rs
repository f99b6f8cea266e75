//! Assignments and the external schedule shape.
//!
//! An [`Assignment`] pairs one class with one time slot — it is both the
//! gene of a chromosome and the unit of the published [`Schedule`]. The
//! schedule carries a start date (epoch days) and leaves week splitting
//! and date formatting to collaborators.

use super::time_slot::{Day, TimeSlot};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A class-to-slot pairing (one gene).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    pub class_id: String,
    pub slot: TimeSlot,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(class_id: impl Into<String>, slot: TimeSlot) -> Self {
        Self {
            class_id: class_id.into(),
            slot,
        }
    }
}

/// A complete weekly schedule: the engine's published output.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    pub assignments: Vec<Assignment>,
    /// First day of the scheduled week (epoch days).
    pub start_date: i64,
    /// Last day of the scheduled span (epoch days), when known.
    pub end_date: Option<i64>,
    /// Number of weeks covered, when known.
    pub weeks: Option<u32>,
}

impl Schedule {
    /// Creates a schedule starting at the given date.
    pub fn new(assignments: Vec<Assignment>, start_date: i64) -> Self {
        Self {
            assignments,
            start_date,
            end_date: None,
            weeks: None,
        }
    }

    /// The assignment for a class, if present.
    pub fn assignment_for_class(&self, class_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.class_id == class_id)
    }

    /// All assignments on a given day.
    pub fn assignments_on_day(&self, day: Day) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.slot.day == day)
            .collect()
    }

    /// All assignments flagged as locked.
    pub fn locked_assignments(&self) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.slot.is_fixed)
            .collect()
    }

    /// Whether no assignment occupies the given slot.
    pub fn is_slot_free(&self, slot: &TimeSlot) -> bool {
        !self.assignments.iter().any(|a| a.slot.same_slot(slot))
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> Schedule {
        Schedule::new(
            vec![
                Assignment::new("math-1", TimeSlot::new(Day::Monday, 1)),
                Assignment::new("phys-1", TimeSlot::new(Day::Monday, 2).fixed()),
                Assignment::new("chem-1", TimeSlot::new(Day::Wednesday, 3)),
            ],
            20_000,
        )
    }

    #[test]
    fn test_assignment_lookup() {
        let s = sample_schedule();
        let a = s.assignment_for_class("chem-1").unwrap();
        assert_eq!(a.slot.day, Day::Wednesday);
        assert!(s.assignment_for_class("none").is_none());
    }

    #[test]
    fn test_assignments_on_day() {
        let s = sample_schedule();
        assert_eq!(s.assignments_on_day(Day::Monday).len(), 2);
        assert_eq!(s.assignments_on_day(Day::Wednesday).len(), 1);
        assert!(s.assignments_on_day(Day::Friday).is_empty());
    }

    #[test]
    fn test_locked_assignments() {
        let s = sample_schedule();
        let locked = s.locked_assignments();
        assert_eq!(locked.len(), 1);
        assert_eq!(locked[0].class_id, "phys-1");
    }

    #[test]
    fn test_slot_freedom() {
        let s = sample_schedule();
        assert!(!s.is_slot_free(&TimeSlot::new(Day::Monday, 1)));
        assert!(s.is_slot_free(&TimeSlot::new(Day::Monday, 3)));
    }

    #[test]
    fn test_counts_and_dates() {
        let s = sample_schedule();
        assert_eq!(s.assignment_count(), 3);
        assert_eq!(s.start_date, 20_000);
        assert!(s.end_date.is_none());
        assert!(s.weeks.is_none());
    }
}
