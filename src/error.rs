//! Error types for the timetabling engine.
//!
//! Only programmer-contract violations are surfaced as errors: mismatched
//! parent gene counts, over-capacity population replacement, queries on an
//! empty population, and invalid configuration. Every other degenerate
//! condition (undersized population, no conflict-free slot left, tournament
//! pool too small) is absorbed by synthesizing random chromosomes — the
//! engine always returns a best-effort schedule plus its violation count.

use thiserror::Error;

/// Errors raised by the timetabling engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// Crossover was attempted between parents of different gene counts.
    #[error("parent gene counts differ: {left} vs {right}")]
    GeneCountMismatch { left: usize, right: usize },

    /// A population replacement exceeded the fixed capacity.
    #[error("cannot adopt {supplied} chromosomes into a population of capacity {capacity}")]
    CapacityExceeded { supplied: usize, capacity: usize },

    /// A best-chromosome query was made against an empty population.
    #[error("population is empty")]
    EmptyPopulation,

    /// An operation referenced a class id with no gene in the chromosome.
    #[error("no assignment for class: {0}")]
    UnknownClass(String),

    /// An assignment update targeted a slot already held by another class.
    #[error("time slot already occupied by class: {class_id}")]
    SlotOccupied { class_id: String },

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gene_count_mismatch_display() {
        let err = EngineError::GeneCountMismatch { left: 3, right: 5 };
        assert_eq!(err.to_string(), "parent gene counts differ: 3 vs 5");
    }

    #[test]
    fn test_capacity_exceeded_display() {
        let err = EngineError::CapacityExceeded {
            supplied: 12,
            capacity: 10,
        };
        assert_eq!(
            err.to_string(),
            "cannot adopt 12 chromosomes into a population of capacity 10"
        );
    }

    #[test]
    fn test_slot_occupied_display() {
        let err = EngineError::SlotOccupied {
            class_id: "math-101".into(),
        };
        assert_eq!(
            err.to_string(),
            "time slot already occupied by class: math-101"
        );
    }

    #[test]
    fn test_unknown_class_display() {
        let err = EngineError::UnknownClass("bio-2".into());
        assert_eq!(err.to_string(), "no assignment for class: bio-2");
    }
}
