//! The fitness-evaluation contract and a reference grid evaluator.
//!
//! The engine treats the scorer as an opaque collaborator: it must be
//! deterministic for a fixed chromosome and constraint set, higher
//! `fitness_score` must mean better, and `hard_constraint_violations == 0`
//! means structurally acceptable. The authoritative comparator for the
//! whole engine is lexicographic: fewer hard violations first, strictly
//! higher fitness second ([`Evaluation::is_better_than`]).

use std::collections::HashMap;

use super::chromosome::Chromosome;
use crate::model::Roster;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One detected constraint violation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Violation {
    /// Identifier of the violated constraint rule.
    pub constraint_id: String,
    /// Related entity (usually a class id).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
    /// Whether this violation is hard (structural) or soft (preference).
    pub hard: bool,
}

impl Violation {
    /// Creates a hard violation.
    pub fn hard(
        constraint_id: impl Into<String>,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            constraint_id: constraint_id.into(),
            entity_id: entity_id.into(),
            message: message.into(),
            hard: true,
        }
    }

    /// Creates a soft violation.
    pub fn soft(
        constraint_id: impl Into<String>,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            constraint_id: constraint_id.into(),
            entity_id: entity_id.into(),
            message: message.into(),
            hard: false,
        }
    }
}

/// Result of scoring one chromosome.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Evaluation {
    /// Scalar goodness score; higher is better.
    pub fitness_score: f64,
    /// Number of hard-constraint violations; zero means acceptable.
    pub hard_constraint_violations: usize,
    /// Every violation found, hard and soft.
    pub violations: Vec<Violation>,
}

impl Evaluation {
    /// Builds an evaluation, deriving the hard count from the violation list.
    pub fn from_violations(fitness_score: f64, violations: Vec<Violation>) -> Self {
        let hard_constraint_violations = violations.iter().filter(|v| v.hard).count();
        Self {
            fitness_score,
            hard_constraint_violations,
            violations,
        }
    }

    /// The engine-wide lexicographic comparator.
    ///
    /// `self` beats `other` iff it has strictly fewer hard violations, or
    /// an equal count with a strictly higher fitness score.
    pub fn is_better_than(&self, other: &Evaluation) -> bool {
        if self.hard_constraint_violations != other.hard_constraint_violations {
            return self.hard_constraint_violations < other.hard_constraint_violations;
        }
        self.fitness_score > other.fitness_score
    }
}

/// Descriptor of one rule in the evaluator's constraint catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintSpec {
    pub id: String,
    pub parameters: HashMap<String, f64>,
}

impl ConstraintSpec {
    /// Creates a parameterless constraint descriptor.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parameters: HashMap::new(),
        }
    }

    /// Adds a named parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: f64) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }
}

/// The external scorer contract.
///
/// Implementations must be deterministic for a fixed chromosome and
/// constraint set. The constraint catalog of the surrounding system
/// (personal conflicts, class-count limits, consecutive-period caps,
/// teacher preferences, workload balancing) lives behind this seam.
pub trait FitnessEvaluator {
    /// Scores one chromosome.
    fn evaluate(&self, chromosome: &Chromosome) -> Evaluation;

    /// Enumerates the active constraint rules.
    fn constraints(&self) -> Vec<ConstraintSpec> {
        Vec::new()
    }
}

/// Reference evaluator over the weekly grid.
///
/// Hard rules: a class sitting on one of its own conflict slots, and two
/// classes double-booked into one slot. Soft rules: per-day and per-week
/// class-count caps, plus a workload-balance penalty on the spread between
/// the busiest and quietest day. The full rule catalog of the surrounding
/// system is an external collaborator; this implementation exists so the
/// engine is usable and testable on its own.
#[derive(Debug, Clone)]
pub struct GridEvaluator {
    roster: Roster,
    max_classes_per_day: Option<usize>,
    max_classes_per_week: Option<usize>,
}

const BASE_SCORE: f64 = 100.0;
const HARD_PENALTY: f64 = 25.0;
const SOFT_PENALTY: f64 = 5.0;
const SPREAD_PENALTY: f64 = 1.0;

impl GridEvaluator {
    /// Creates an evaluator with no class-count caps.
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            max_classes_per_day: None,
            max_classes_per_week: None,
        }
    }

    /// Caps the number of classes per day (soft).
    pub fn with_max_classes_per_day(mut self, max: usize) -> Self {
        self.max_classes_per_day = Some(max);
        self
    }

    /// Caps the number of classes per week (soft).
    pub fn with_max_classes_per_week(mut self, max: usize) -> Self {
        self.max_classes_per_week = Some(max);
        self
    }
}

impl FitnessEvaluator for GridEvaluator {
    fn evaluate(&self, chromosome: &Chromosome) -> Evaluation {
        let genes = chromosome.genes();
        let mut violations = Vec::new();

        // Personal conflicts.
        for gene in genes {
            if let Some(class) = self.roster.class(&gene.class_id) {
                if class.conflicts_with(&gene.slot) {
                    violations.push(Violation::hard(
                        "personal-conflict",
                        &gene.class_id,
                        format!(
                            "class {} assigned to one of its conflict slots",
                            gene.class_id
                        ),
                    ));
                }
            }
        }

        // Double bookings: each extra occupant of a slot is one violation.
        for (i, a) in genes.iter().enumerate() {
            for b in genes.iter().skip(i + 1) {
                if a.slot.same_slot(&b.slot) {
                    violations.push(Violation::hard(
                        "slot-occupancy",
                        &b.class_id,
                        format!(
                            "classes {} and {} share a time slot",
                            a.class_id, b.class_id
                        ),
                    ));
                }
            }
        }

        // Per-day counts: cap excess (soft) and workload spread.
        let mut per_day: HashMap<crate::model::Day, usize> = HashMap::new();
        for gene in genes {
            *per_day.entry(gene.slot.day).or_insert(0) += 1;
        }
        if let Some(max) = self.max_classes_per_day {
            for (day, count) in &per_day {
                if *count > max {
                    for _ in 0..(count - max) {
                        violations.push(Violation::soft(
                            "max-classes-per-day",
                            format!("{day:?}"),
                            format!("{count} classes on {day:?}, limit {max}"),
                        ));
                    }
                }
            }
        }
        if let Some(max) = self.max_classes_per_week {
            if genes.len() > max {
                for _ in 0..(genes.len() - max) {
                    violations.push(Violation::soft(
                        "max-classes-per-week",
                        "week",
                        format!("{} classes this week, limit {max}", genes.len()),
                    ));
                }
            }
        }

        let spread = {
            let counts: Vec<usize> = self
                .roster
                .grid
                .days
                .iter()
                .map(|d| per_day.get(d).copied().unwrap_or(0))
                .collect();
            match (counts.iter().max(), counts.iter().min()) {
                (Some(max), Some(min)) => (max - min) as f64,
                _ => 0.0,
            }
        };

        let hard = violations.iter().filter(|v| v.hard).count() as f64;
        let soft = violations.iter().filter(|v| !v.hard).count() as f64;
        let fitness_score =
            BASE_SCORE - HARD_PENALTY * hard - SOFT_PENALTY * soft - SPREAD_PENALTY * spread;

        Evaluation::from_violations(fitness_score, violations)
    }

    fn constraints(&self) -> Vec<ConstraintSpec> {
        let mut specs = vec![
            ConstraintSpec::new("personal-conflict"),
            ConstraintSpec::new("slot-occupancy"),
            ConstraintSpec::new("workload-balance"),
        ];
        if let Some(max) = self.max_classes_per_day {
            specs.push(ConstraintSpec::new("max-classes-per-day").with_parameter("max", max as f64));
        }
        if let Some(max) = self.max_classes_per_week {
            specs
                .push(ConstraintSpec::new("max-classes-per-week").with_parameter("max", max as f64));
        }
        specs
    }
}
