//! Fixed-capacity chromosome population.
//!
//! Holds the candidate schedules evolved together and the selection and
//! replacement primitives the orchestrator uses. Fitness lives inside
//! each chromosome (cached [`Evaluation`]); an unscored chromosome sorts
//! as 0. Degenerate states never fail here: a population smaller than a
//! tournament, or a short replacement list, is padded with freshly
//! generated random chromosomes.
//!
//! [`Evaluation`]: super::evaluator::Evaluation

use rand::Rng;

use super::chromosome::Chromosome;
use crate::error::{EngineError, EngineResult};
use crate::model::Roster;

/// Fixed-capacity collection of chromosomes.
#[derive(Debug, Clone)]
pub struct Population {
    capacity: usize,
    members: Vec<Chromosome>,
}

impl Population {
    /// Creates an empty population of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            members: Vec::with_capacity(capacity),
        }
    }

    /// The fixed capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current member count.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether no members are held.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The members, in insertion (or last-sorted) order.
    pub fn members(&self) -> &[Chromosome] {
        &self.members
    }

    /// Mutable member access — the evaluation entry point.
    pub fn members_mut(&mut self) -> &mut [Chromosome] {
        &mut self.members
    }

    /// Fills the population to capacity with random chromosomes.
    pub fn seed_random<R: Rng>(&mut self, roster: &Roster, rng: &mut R) {
        while self.members.len() < self.capacity {
            self.members.push(Chromosome::random(roster, rng));
        }
    }

    /// Adds a chromosome, respecting the starvation-avoidance policy.
    ///
    /// Under capacity the chromosome is appended. At capacity the worst
    /// member (lowest cached fitness) is replaced only when the candidate
    /// is unscored or strictly better than that worst fitness — a better
    /// incumbent is never displaced by a worse candidate.
    pub fn add_chromosome(&mut self, chromosome: Chromosome) {
        if self.members.len() < self.capacity {
            self.members.push(chromosome);
            return;
        }
        let Some(worst_idx) = self.worst_index() else {
            return; // zero capacity
        };
        let worst_fitness = self.members[worst_idx].fitness_score();
        let replace = match chromosome.evaluation() {
            None => true,
            Some(e) => e.fitness_score > worst_fitness,
        };
        if replace {
            self.members[worst_idx] = chromosome;
        }
    }

    /// Tournament selection over `k` distinct members.
    ///
    /// When fewer than `k` members exist, the population is first padded
    /// with fresh random chromosomes. The winner is the highest cached
    /// fitness among `k` indices drawn without replacement; ties go to
    /// the first encountered.
    pub fn tournament_selection<R: Rng>(
        &mut self,
        k: usize,
        roster: &Roster,
        rng: &mut R,
    ) -> Chromosome {
        let k = k.max(1);
        while self.members.len() < k {
            self.members.push(Chromosome::random(roster, rng));
        }

        let indices = rand::seq::index::sample(rng, self.members.len(), k);
        let mut best = indices.index(0);
        for idx in indices.iter().skip(1) {
            if self.members[idx].fitness_score() > self.members[best].fitness_score() {
                best = idx;
            }
        }
        self.members[best].clone()
    }

    /// Adopts a new member list wholesale.
    ///
    /// Fails with [`EngineError::CapacityExceeded`] when the list is too
    /// long; pads with random chromosomes when it is short.
    pub fn replace_with<R: Rng>(
        &mut self,
        chromosomes: Vec<Chromosome>,
        roster: &Roster,
        rng: &mut R,
    ) -> EngineResult<()> {
        if chromosomes.len() > self.capacity {
            return Err(EngineError::CapacityExceeded {
                supplied: chromosomes.len(),
                capacity: self.capacity,
            });
        }
        self.members = chromosomes;
        self.seed_random(roster, rng);
        Ok(())
    }

    /// Stable descending sort by cached fitness (unscored sorts as 0).
    pub fn sort_by_fitness(&mut self) {
        self.members.sort_by(|a, b| {
            b.fitness_score()
                .partial_cmp(&a.fitness_score())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// The highest-fitness member.
    ///
    /// Fails with [`EngineError::EmptyPopulation`] when no members exist.
    pub fn fittest(&mut self) -> EngineResult<&Chromosome> {
        if self.members.is_empty() {
            return Err(EngineError::EmptyPopulation);
        }
        self.sort_by_fitness();
        Ok(&self.members[0])
    }

    /// The `n` highest-fitness members, best first.
    ///
    /// Fails with [`EngineError::EmptyPopulation`] when no members exist;
    /// returns fewer than `n` when the population is smaller.
    pub fn fittest_n(&mut self, n: usize) -> EngineResult<Vec<&Chromosome>> {
        if self.members.is_empty() {
            return Err(EngineError::EmptyPopulation);
        }
        self.sort_by_fitness();
        Ok(self.members.iter().take(n).collect())
    }

    fn worst_index(&self) -> Option<usize> {
        if self.members.is_empty() {
            return None;
        }
        let mut worst = 0;
        for (i, m) in self.members.iter().enumerate().skip(1) {
            if m.fitness_score() < self.members[worst].fitness_score() {
                worst = i;
            }
        }
        Some(worst)
    }
}
