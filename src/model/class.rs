//! Classes and the roster (problem instance).

use super::time_slot::{SlotGrid, TimeSlot};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A class to be scheduled.
///
/// `conflicts` enumerates slots this class may never occupy (teacher
/// unavailability, room blocks). Conflict slots are compared with
/// [`TimeSlot::same_slot`], so dated conflicts only collide with matching
/// dates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Class {
    pub id: String,
    pub name: String,
    pub conflicts: Vec<TimeSlot>,
}

impl Class {
    /// Creates a class with no conflicts.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            conflicts: Vec::new(),
        }
    }

    /// Adds a conflict slot.
    pub fn with_conflict(mut self, slot: TimeSlot) -> Self {
        self.conflicts.push(slot);
        self
    }

    /// Whether this class is forbidden from the given slot.
    pub fn conflicts_with(&self, slot: &TimeSlot) -> bool {
        self.conflicts.iter().any(|c| c.same_slot(slot))
    }
}

/// The governing class set plus its slot universe.
///
/// A roster is the immutable problem instance shared by every chromosome
/// of one run: the classes to place and the grid they are placed into.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Roster {
    pub classes: Vec<Class>,
    pub grid: SlotGrid,
}

impl Roster {
    /// Creates a roster.
    pub fn new(classes: Vec<Class>, grid: SlotGrid) -> Self {
        Self { classes, grid }
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the roster has no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Looks up a class by id.
    pub fn class(&self, id: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Day;

    #[test]
    fn test_conflicts_with() {
        let class = Class::new("math-1", "Mathematics")
            .with_conflict(TimeSlot::new(Day::Monday, 1))
            .with_conflict(TimeSlot::new(Day::Friday, 6));

        assert!(class.conflicts_with(&TimeSlot::new(Day::Monday, 1)));
        assert!(class.conflicts_with(&TimeSlot::new(Day::Friday, 6)));
        assert!(!class.conflicts_with(&TimeSlot::new(Day::Monday, 2)));
        assert!(!class.conflicts_with(&TimeSlot::new(Day::Tuesday, 1)));
    }

    #[test]
    fn test_conflict_uses_slot_identity() {
        // A dated conflict only collides with the matching date.
        let class = Class::new("chem-1", "Chemistry")
            .with_conflict(TimeSlot::new(Day::Monday, 1).with_date(20_000));

        assert!(class.conflicts_with(&TimeSlot::new(Day::Tuesday, 1).with_date(20_000)));
        assert!(!class.conflicts_with(&TimeSlot::new(Day::Monday, 1).with_date(20_001)));
    }

    #[test]
    fn test_roster_lookup() {
        let roster = Roster::new(
            vec![Class::new("a", "A"), Class::new("b", "B")],
            SlotGrid::weekdays(6),
        );
        assert_eq!(roster.len(), 2);
        assert!(!roster.is_empty());
        assert_eq!(roster.class("b").map(|c| c.name.as_str()), Some("B"));
        assert!(roster.class("z").is_none());
    }
}
