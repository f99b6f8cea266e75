//! The generational orchestrator.
//!
//! [`GeneticAlgorithm`] seeds a population of random chromosomes, scores
//! them through the [`FitnessEvaluator`], and evolves generation by
//! generation: elitism (the champion unconditionally, plus a configured
//! top fraction), tournament-selected parents, gated crossover, mutation,
//! wholesale replacement, re-scoring. The champion is replaced only by a
//! candidate with strictly fewer hard violations, or an equal count and a
//! strictly higher fitness score — the lexicographic tie-break that
//! governs the whole engine.
//!
//! The engine never reports "no schedule found": degenerate populations
//! are repaired by synthesizing random chromosomes, and every run returns
//! its best-effort champion together with an honest violation count.
//! Cooperative cancellation is checked at each generation boundary.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;

use super::chromosome::Chromosome;
use super::config::GaConfig;
use super::evaluator::{FitnessEvaluator, GridEvaluator};
use super::operators::GeneticOperators;
use super::population::Population;
use crate::error::EngineResult;
use crate::model::{Assignment, Roster, Schedule};
use crate::random::create_rng;

/// Per-run statistics computed from the live population's cached fitness
/// plus a fresh evaluation of the champion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaStats {
    pub generation: usize,
    pub best_fitness: f64,
    pub average_fitness: f64,
    pub worst_fitness: f64,
    pub population_size: usize,
    pub hard_constraint_violations: usize,
}

/// The GA scheduling engine.
///
/// One instance exclusively owns its population and random-number stream;
/// runs are synchronous and CPU-bound, so callers should keep the evolve
/// loop off any interactive thread and serialize concurrent
/// re-optimization requests against the same schedule themselves.
pub struct GeneticAlgorithm<E: FitnessEvaluator> {
    config: GaConfig,
    roster: Roster,
    evaluator: E,
    operators: GeneticOperators,
    population: Population,
    champion: Chromosome,
    generation: usize,
    rng: StdRng,
}

impl<E: FitnessEvaluator> GeneticAlgorithm<E> {
    /// Creates an engine with a seeded, scored population and an initial
    /// champion.
    ///
    /// Fails only when the configuration is invalid.
    pub fn new(roster: Roster, evaluator: E, config: GaConfig) -> EngineResult<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let mut population = Population::new(config.population_size);
        population.seed_random(&roster, &mut rng);
        for member in population.members_mut() {
            let eval = evaluator.evaluate(member);
            member.set_evaluation(eval);
        }
        let champion = best_of(population.members())
            .expect("seeded population is never empty")
            .clone();

        let operators = GeneticOperators::new(config.crossover_rate, config.mutation_rate);

        Ok(Self {
            config,
            roster,
            evaluator,
            operators,
            population,
            champion,
            generation: 0,
            rng,
        })
    }

    /// The current champion (a clone-independent snapshot of the best
    /// chromosome seen so far).
    pub fn champion(&self) -> &Chromosome {
        &self.champion
    }

    /// The monotone generation counter, reset only by
    /// [`evolve_with_initial_population`](Self::evolve_with_initial_population).
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The live population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// The active configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs the configured number of generations and returns the champion.
    pub fn evolve(&mut self) -> Chromosome {
        self.evolve_with_cancel(None)
    }

    /// Runs the evolve loop with a cooperative cancellation flag.
    ///
    /// The flag is checked at each generation boundary; when set, the
    /// current champion is returned immediately.
    pub fn evolve_with_cancel(&mut self, cancel: Option<&AtomicBool>) -> Chromosome {
        let mut cancelled = false;
        for _ in 0..self.config.generations {
            if let Some(flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            self.advance_generation();
        }

        let eval = self.champion.evaluation();
        tracing::info!(
            generation = self.generation,
            cancelled,
            best_fitness = eval.map_or(0.0, |e| e.fitness_score),
            hard_violations = eval.map_or(0, |e| e.hard_constraint_violations),
            "evolution finished"
        );
        self.champion.clone()
    }

    /// Re-enters the initialized state with caller-supplied chromosomes,
    /// resetting the generation counter and the champion, then evolves.
    ///
    /// Seeds are repaired against the roster (unknown-class genes dropped,
    /// missing classes assigned) and re-scored; a short seed list is
    /// padded with randoms, an over-supplied one truncated to capacity.
    pub fn evolve_with_initial_population(&mut self, seeds: Vec<Chromosome>) -> Chromosome {
        let capacity = self.population.capacity();
        let mut seeds = seeds;
        seeds.truncate(capacity);
        for seed in &mut seeds {
            seed.clear_evaluation();
            seed.retain_roster_classes(&self.roster);
            seed.ensure_all_classes_assigned(&self.roster, &mut self.rng);
        }

        self.generation = 0;
        let mut population = Population::new(capacity);
        population
            .replace_with(seeds, &self.roster, &mut self.rng)
            .expect("seed list was truncated to capacity");
        self.population = population;
        self.score_population();
        self.champion = best_of(self.population.members())
            .expect("seeded population is never empty")
            .clone();

        self.evolve()
    }

    /// Evolves a schedule for the week starting at `start_date`
    /// (epoch days).
    pub fn generate_schedule(&mut self, start_date: i64) -> Schedule {
        let best = self.evolve();
        Schedule::new(best.genes().to_vec(), start_date)
    }

    /// Re-optimizes an existing schedule, preserving locked assignments.
    ///
    /// Classes listed in `locked_class_ids` keep their current slot
    /// (flagged fixed); every other class is re-randomized in each seed
    /// chromosome before the evolve loop reruns.
    pub fn re_optimize_schedule(
        &mut self,
        locked_class_ids: &[String],
        current: &Schedule,
    ) -> Schedule {
        let locked: Vec<Assignment> = current
            .assignments
            .iter()
            .filter(|a| locked_class_ids.iter().any(|id| id == &a.class_id))
            .cloned()
            .collect();

        let capacity = self.population.capacity();
        let seeds: Vec<Chromosome> = (0..capacity)
            .map(|_| Chromosome::random_with_locked(&self.roster, &locked, &mut self.rng))
            .collect();

        let best = self.evolve_with_initial_population(seeds);
        let mut schedule = Schedule::new(best.genes().to_vec(), current.start_date);
        schedule.end_date = current.end_date;
        schedule.weeks = current.weeks;
        schedule
    }

    /// Builds one generation and replaces the live population.
    pub fn advance_generation(&mut self) {
        let capacity = self.population.capacity();
        let elite_count = (capacity as f64 * self.config.elite_ratio) as usize;

        // Elitism: the champion unconditionally, then the configured top
        // fraction of the outgoing population.
        let mut next: Vec<Chromosome> = Vec::with_capacity(capacity);
        next.push(self.champion.clone());
        self.population.sort_by_fitness();
        for member in self.population.members().iter().take(elite_count) {
            if next.len() >= capacity {
                break;
            }
            next.push(member.clone());
        }

        // Offspring: tournament parents, gated crossover, mutation.
        while next.len() < capacity {
            let parent1 = self.population.tournament_selection(
                self.config.tournament_size,
                &self.roster,
                &mut self.rng,
            );
            let parent2 = self.population.tournament_selection(
                self.config.tournament_size,
                &self.roster,
                &mut self.rng,
            );
            let (child1, child2) = self
                .operators
                .crossover(&parent1, &parent2, &mut self.rng)
                .expect("parents drawn from one roster share a gene count");
            let child1 = self
                .operators
                .advanced_mutate(&child1, self.config.max_swaps, &mut self.rng);
            let child2 = self
                .operators
                .advanced_mutate(&child2, self.config.max_swaps, &mut self.rng);

            next.push(child1);
            if next.len() < capacity {
                next.push(child2);
            }
        }

        self.population
            .replace_with(next, &self.roster, &mut self.rng)
            .expect("offspring list is built within capacity");
        self.score_population();
        self.update_champion();
        self.generation += 1;

        let eval = self.champion.evaluation();
        tracing::debug!(
            generation = self.generation,
            best_fitness = eval.map_or(0.0, |e| e.fitness_score),
            hard_violations = eval.map_or(0, |e| e.hard_constraint_violations),
            "generation complete"
        );
    }

    /// Statistics over the live population plus a fresh champion
    /// evaluation.
    pub fn statistics(&self) -> GaStats {
        let scores: Vec<f64> = self
            .population
            .members()
            .iter()
            .map(|m| m.fitness_score())
            .collect();
        let (best, worst, average) = if scores.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            let best = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let worst = scores.iter().cloned().fold(f64::INFINITY, f64::min);
            let average = scores.iter().sum::<f64>() / scores.len() as f64;
            (best, worst, average)
        };
        let champion_eval = self.evaluator.evaluate(&self.champion);

        GaStats {
            generation: self.generation,
            best_fitness: best,
            average_fitness: average,
            worst_fitness: worst,
            population_size: self.population.len(),
            hard_constraint_violations: champion_eval.hard_constraint_violations,
        }
    }

    /// Scores every member lacking a cached evaluation.
    ///
    /// The evaluator is deterministic, so carried elites keep their cache.
    fn score_population(&mut self) {
        for member in self.population.members_mut() {
            if member.evaluation().is_none() {
                let eval = self.evaluator.evaluate(member);
                member.set_evaluation(eval);
            }
        }
    }

    /// Promotes the best population member over the champion when it wins
    /// the lexicographic comparison.
    fn update_champion(&mut self) {
        let Some(best) = best_of(self.population.members()) else {
            return;
        };
        let promote = match (self.champion.evaluation(), best.evaluation()) {
            (None, _) => true,
            (Some(champ), Some(cand)) => cand.is_better_than(champ),
            (Some(_), None) => false,
        };
        if promote {
            let best = best.clone();
            self.champion = best;
        }
    }
}

impl GeneticAlgorithm<GridEvaluator> {
    /// Creates an engine with the built-in grid evaluator, wiring the
    /// config's class-count caps into it.
    pub fn with_grid_evaluator(roster: Roster, config: GaConfig) -> EngineResult<Self> {
        let mut evaluator = GridEvaluator::new(roster.clone());
        if let Some(max) = config.max_classes_per_day {
            evaluator = evaluator.with_max_classes_per_day(max);
        }
        if let Some(max) = config.max_classes_per_week {
            evaluator = evaluator.with_max_classes_per_week(max);
        }
        Self::new(roster, evaluator, config)
    }
}

/// Best evaluated chromosome under the lexicographic comparator.
fn best_of(members: &[Chromosome]) -> Option<&Chromosome> {
    let mut best: Option<&Chromosome> = None;
    for member in members {
        let Some(eval) = member.evaluation() else {
            continue;
        };
        match best.and_then(|b| b.evaluation()) {
            None => best = Some(member),
            Some(best_eval) => {
                if eval.is_better_than(best_eval) {
                    best = Some(member);
                }
            }
        }
    }
    best
}
