//! Genetic-algorithm timetabling core.
//!
//! The engine evolves a fixed-capacity [`Population`] of [`Chromosome`]s
//! (one complete candidate schedule each) under a pluggable
//! [`FitnessEvaluator`], using gated single-point and uniform crossover
//! plus slot-swap mutation from [`GeneticOperators`]. The
//! [`GeneticAlgorithm`] orchestrator seeds, scores, and replaces
//! populations generation by generation, tracking a champion under the
//! lexicographic comparator: fewer hard-constraint violations first,
//! strictly higher fitness second.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, rates, presets)
//! - [`Chromosome`]: One full candidate schedule with cached evaluation
//! - [`GeneticOperators`]: Crossover and mutation transforms
//! - [`Population`]: Selection and replacement primitives
//! - [`FitnessEvaluator`] / [`Evaluation`]: The external scorer contract
//! - [`GeneticAlgorithm`]: The generational orchestrator, including
//!   locked-assignment re-optimization
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*
//! - Abramson (1991), *Constructing School Timetables Using Simulated
//!   Annealing: Sequential and Parallel Algorithms*

mod chromosome;
mod config;
mod evaluator;
mod operators;
mod population;
mod runner;

pub use chromosome::Chromosome;
pub use config::GaConfig;
pub use evaluator::{ConstraintSpec, Evaluation, FitnessEvaluator, GridEvaluator, Violation};
pub use operators::GeneticOperators;
pub use population::Population;
pub use runner::{GaStats, GeneticAlgorithm};
