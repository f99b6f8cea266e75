//! GA configuration.
//!
//! [`GaConfig`] holds every parameter of the evolutionary loop.

use crate::error::{EngineError, EngineResult};

/// Configuration for the timetabling GA.
///
/// # Defaults
///
/// ```
/// use timegrid::engine::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use timegrid::engine::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(100)
///     .with_tournament_size(5)
///     .with_mutation_rate(0.2)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Number of chromosomes in the population.
    ///
    /// Larger populations increase diversity but slow down each
    /// generation. Typical range: 30–200.
    pub population_size: usize,

    /// Number of generations to evolve per run.
    pub generations: usize,

    /// Probability of applying crossover to a parent pair (0.0–1.0).
    ///
    /// When crossover is gated out, both parents are cloned unchanged.
    pub crossover_rate: f64,

    /// Probability of applying mutation to an offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Tournament size for parent selection.
    ///
    /// Higher values mean stronger selection pressure; 3–5 is typical.
    pub tournament_size: usize,

    /// Fraction of the population carried unchanged as elites (0.0–1.0).
    ///
    /// The champion is always carried in addition to this fraction.
    pub elite_ratio: f64,

    /// Upper bound on swaps per `advanced_mutate` application.
    pub max_swaps: usize,

    /// Soft cap on classes per day, forwarded to the evaluator.
    pub max_classes_per_day: Option<usize>,

    /// Soft cap on classes per week, forwarded to the evaluator.
    pub max_classes_per_week: Option<usize>,

    /// Random seed for reproducibility. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            tournament_size: 3,
            elite_ratio: 0.1,
            max_swaps: 3,
            max_classes_per_day: None,
            max_classes_per_week: None,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation count.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the crossover rate (clamped to [0, 1]).
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate (clamped to [0, 1]).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the elite ratio (clamped to [0, 1]).
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the advanced-mutation swap bound.
    pub fn with_max_swaps(mut self, n: usize) -> Self {
        self.max_swaps = n;
        self
    }

    /// Sets the per-day class cap.
    pub fn with_max_classes_per_day(mut self, max: usize) -> Self {
        self.max_classes_per_day = Some(max);
        self
    }

    /// Sets the per-week class cap.
    pub fn with_max_classes_per_week(mut self, max: usize) -> Self {
        self.max_classes_per_week = Some(max);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick runs: small population, few generations.
    ///
    /// Suitable for small rosters or interactive previews.
    pub fn fast() -> Self {
        Self {
            population_size: 30,
            generations: 50,
            ..Self::default()
        }
    }

    /// Preset balancing quality and runtime.
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Preset for quality: large population, many generations.
    pub fn quality() -> Self {
        Self {
            population_size: 150,
            generations: 300,
            ..Self::default()
        }
    }

    /// Picks a preset from the roster size.
    ///
    /// - fewer than 15 classes → [`fast()`](Self::fast)
    /// - 15–59 classes → [`balanced()`](Self::balanced)
    /// - 60 or more → [`quality()`](Self::quality)
    pub fn auto_select(class_count: usize) -> Self {
        if class_count < 15 {
            Self::fast()
        } else if class_count < 60 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> EngineResult<()> {
        if self.population_size < 2 {
            return Err(EngineError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.generations == 0 {
            return Err(EngineError::InvalidConfig(
                "generations must be at least 1".into(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(EngineError::InvalidConfig(
                "tournament_size must be at least 1".into(),
            ));
        }
        let elite_count = (self.population_size as f64 * self.elite_ratio) as usize;
        if elite_count >= self.population_size {
            return Err(EngineError::InvalidConfig(
                "elite_ratio too high: elites fill the entire population".into(),
            ));
        }
        Ok(())
    }
}
