//! Genetic-algorithm weekly timetabling engine.
//!
//! Assigns a fixed set of classes to weekly time slots (day × period) so
//! that every class gets exactly one slot, hard constraints (personal
//! conflicts, double-booking) are never violated when avoidable, and soft
//! preferences are optimized. The engine always returns a best-effort
//! schedule together with an honest violation count; it never reports
//! "no schedule found".
//!
//! # Modules
//!
//! - **`model`**: Domain types — `Day`, `TimeSlot`, `SlotGrid`, `Class`,
//!   `Roster`, `Assignment`, `Schedule`
//! - **`engine`**: The GA core — `Chromosome`, `GeneticOperators`,
//!   `Population`, the `FitnessEvaluator` contract, and the
//!   `GeneticAlgorithm` orchestrator with locked-assignment
//!   re-optimization
//! - **`error`**: Typed errors for programmer-contract violations
//! - **`random`**: Seedable RNG construction for reproducible runs
//!
//! # Design
//!
//! The engine is synchronous and single-threaded: one `GeneticAlgorithm`
//! instance exclusively owns its population and random-number stream.
//! All randomness is injectable (seed via [`engine::GaConfig::with_seed`],
//! explicit `&mut impl Rng` on the lower-level primitives), making
//! evolution reproducible. Cooperative cancellation is checked at each
//! generation boundary.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*
//! - Burke & Petrovic (2002), *Recent Research Directions in Automated
//!   Timetabling*

pub mod engine;
pub mod error;
pub mod model;
pub mod random;
