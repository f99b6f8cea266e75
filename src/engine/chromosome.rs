//! One complete candidate schedule.
//!
//! A chromosome holds exactly one [`Assignment`] per class of the
//! governing roster. The invariant is enforced at construction and after
//! any gene replacement ([`Chromosome::set_genes`] repairs missing
//! classes). Double-booking a slot is representable on purpose: the
//! fallback assignment policy reuses slots when no free one is left, and
//! the evaluator scores the damage instead of the type system forbidding
//! it.
//!
//! Chromosomes are immutable in spirit: the variation operators always
//! clone-then-modify. [`update_assignment`](Chromosome::update_assignment)
//! and [`swap_assignments`](Chromosome::swap_assignments) are the only
//! in-place edit entry points, and every gene edit clears the cached
//! evaluation so a stale score can never drive selection.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::evaluator::Evaluation;
use crate::error::{EngineError, EngineResult};
use crate::model::{Assignment, Class, Day, Roster, TimeSlot};

/// One full candidate schedule: an ordered gene list plus a cached score.
#[derive(Debug, Clone)]
pub struct Chromosome {
    genes: Vec<Assignment>,
    evaluation: Option<Evaluation>,
}

impl Chromosome {
    /// Wraps caller-supplied genes without repair.
    ///
    /// Used for re-optimization seeds and tests; the orchestrator repairs
    /// completeness against its roster before evolving such chromosomes.
    pub fn from_assignments(genes: Vec<Assignment>) -> Self {
        Self {
            genes,
            evaluation: None,
        }
    }

    /// Creates a random complete schedule.
    ///
    /// For each class, picks uniformly among grid slots outside the
    /// class's conflict list and unused by earlier genes; falls back to
    /// any unused slot, then to an arbitrary slot (tolerating a
    /// double-booking). Completeness of assignment always wins over
    /// conflict-freedom.
    pub fn random<R: Rng>(roster: &Roster, rng: &mut R) -> Self {
        Self::random_with_locked(roster, &[], rng)
    }

    /// Creates a random schedule with some classes pinned.
    ///
    /// Classes appearing in `locked` keep their pinned slot verbatim
    /// (flagged fixed); all others are randomized as in
    /// [`random`](Self::random). Every pinned slot is reserved before any
    /// movable class picks, so a movable class never grabs a locked slot
    /// while a free one exists.
    pub fn random_with_locked<R: Rng>(
        roster: &Roster,
        locked: &[Assignment],
        rng: &mut R,
    ) -> Self {
        let mut occupied: Vec<Assignment> = roster
            .classes
            .iter()
            .filter_map(|class| {
                locked
                    .iter()
                    .find(|a| a.class_id == class.id)
                    .map(|pin| Assignment::new(&class.id, pin.slot.fixed()))
            })
            .collect();

        let mut genes: Vec<Assignment> = Vec::with_capacity(roster.len());
        for class in &roster.classes {
            if let Some(pin) = occupied.iter().find(|a| a.class_id == class.id) {
                genes.push(pin.clone());
                continue;
            }
            let slot = pick_slot(class, &occupied, roster, rng);
            let gene = Assignment::new(&class.id, slot);
            occupied.push(gene.clone());
            genes.push(gene);
        }
        Self {
            genes,
            evaluation: None,
        }
    }

    /// The gene list, one assignment per class.
    pub fn genes(&self) -> &[Assignment] {
        &self.genes
    }

    /// Number of genes.
    pub fn gene_count(&self) -> usize {
        self.genes.len()
    }

    /// The assignment for a class, if present.
    pub fn assignment_for_class(&self, class_id: &str) -> Option<&Assignment> {
        self.genes.iter().find(|a| a.class_id == class_id)
    }

    /// The class occupying a slot, if any (occupancy identity).
    pub fn class_for_slot(&self, slot: &TimeSlot) -> Option<&str> {
        self.genes
            .iter()
            .find(|a| a.slot.same_slot(slot))
            .map(|a| a.class_id.as_str())
    }

    /// Whether no gene occupies the given slot.
    pub fn is_slot_available(&self, slot: &TimeSlot) -> bool {
        self.class_for_slot(slot).is_none()
    }

    /// Moves a class to a slot.
    ///
    /// Fails with [`EngineError::SlotOccupied`] when a *different* class
    /// already holds the slot; otherwise inserts or overwrites the gene.
    pub fn update_assignment(&mut self, class_id: &str, slot: TimeSlot) -> EngineResult<()> {
        if let Some(owner) = self.class_for_slot(&slot) {
            if owner != class_id {
                return Err(EngineError::SlotOccupied {
                    class_id: owner.to_string(),
                });
            }
        }
        match self.genes.iter_mut().find(|a| a.class_id == class_id) {
            Some(gene) => gene.slot = slot,
            None => self.genes.push(Assignment::new(class_id, slot)),
        }
        self.evaluation = None;
        Ok(())
    }

    /// Exchanges the time slots of two classes in place.
    ///
    /// Fails with [`EngineError::UnknownClass`] when either id has no gene.
    pub fn swap_assignments(&mut self, class_id1: &str, class_id2: &str) -> EngineResult<()> {
        let i = self
            .genes
            .iter()
            .position(|a| a.class_id == class_id1)
            .ok_or_else(|| EngineError::UnknownClass(class_id1.to_string()))?;
        let j = self
            .genes
            .iter()
            .position(|a| a.class_id == class_id2)
            .ok_or_else(|| EngineError::UnknownClass(class_id2.to_string()))?;
        let tmp = self.genes[i].slot;
        self.genes[i].slot = self.genes[j].slot;
        self.genes[j].slot = tmp;
        self.evaluation = None;
        Ok(())
    }

    /// Replaces the gene list, then repairs completeness.
    ///
    /// Any roster class missing from `genes` receives a slot through the
    /// same greedy-with-fallback policy as random construction.
    pub fn set_genes<R: Rng>(&mut self, genes: Vec<Assignment>, roster: &Roster, rng: &mut R) {
        self.genes = genes;
        self.evaluation = None;
        self.ensure_all_classes_assigned(roster, rng);
    }

    /// Drops genes whose class is not in the roster.
    pub fn retain_roster_classes(&mut self, roster: &Roster) {
        let before = self.genes.len();
        self.genes.retain(|a| roster.class(&a.class_id).is_some());
        if self.genes.len() != before {
            self.evaluation = None;
        }
    }

    /// Adds a gene for every roster class that lacks one.
    pub fn ensure_all_classes_assigned<R: Rng>(&mut self, roster: &Roster, rng: &mut R) {
        for class in &roster.classes {
            if self.assignment_for_class(&class.id).is_none() {
                let slot = pick_slot(class, &self.genes, roster, rng);
                self.genes.push(Assignment::new(&class.id, slot));
                self.evaluation = None;
            }
        }
    }

    /// The cached evaluation, if this chromosome has been scored.
    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    /// Caches an evaluation.
    pub fn set_evaluation(&mut self, evaluation: Evaluation) {
        self.evaluation = Some(evaluation);
    }

    /// Drops the cached evaluation.
    pub fn clear_evaluation(&mut self) {
        self.evaluation = None;
    }

    /// Cached fitness score, treating an unscored chromosome as 0.
    pub fn fitness_score(&self) -> f64 {
        self.evaluation.as_ref().map_or(0.0, |e| e.fitness_score)
    }

    /// Mutable gene access for the variation operators.
    pub(crate) fn genes_mut(&mut self) -> &mut Vec<Assignment> {
        self.evaluation = None;
        &mut self.genes
    }
}

/// Greedy slot choice with the fallback chain.
///
/// Conflict-free and unused → any unused → arbitrary grid slot (double
/// booking tolerated) → synthesized Monday/1 when the grid is empty.
fn pick_slot<R: Rng>(
    class: &Class,
    taken: &[Assignment],
    roster: &Roster,
    rng: &mut R,
) -> TimeSlot {
    let all = roster.grid.slots();
    let unused: Vec<TimeSlot> = all
        .iter()
        .filter(|s| !taken.iter().any(|a| a.slot.same_slot(s)))
        .copied()
        .collect();

    let preferred: Vec<TimeSlot> = unused
        .iter()
        .filter(|s| !class.conflicts_with(s))
        .copied()
        .collect();

    if let Some(slot) = preferred.choose(rng) {
        return *slot;
    }
    if let Some(slot) = unused.choose(rng) {
        return *slot;
    }
    if let Some(slot) = all.choose(rng) {
        return *slot;
    }
    TimeSlot::new(Day::Monday, 1)
}
