//! Crossover and mutation transforms over chromosomes.
//!
//! All operators are gated by their configured rate: one uniform draw
//! decides whether the transform applies at all, and the no-op path
//! returns plain clones. Recombination is keyed by **class id**, not gene
//! position — a child always receives the other parent's slot *for the
//! same class*, so every child remains a complete assignment set even
//! when the two parents order their genes differently.
//!
//! # Operators
//!
//! - [`crossover`](GeneticOperators::crossover): gated single-point,
//!   class-id-keyed slot exchange
//! - [`uniform_crossover`](GeneticOperators::uniform_crossover): gated
//!   per-position Bernoulli slot exchange
//! - [`mutate`](GeneticOperators::mutate): one slot swap between two
//!   distinct movable genes
//! - [`advanced_mutate`](GeneticOperators::advanced_mutate): several
//!   independent slot swaps, bounded by half the gene count
//!
//! Both mutations skip genes holding a locked (`is_fixed`) slot, so a
//! re-optimization run can never move a locked assignment.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use rand::Rng;

use super::chromosome::Chromosome;
use crate::error::{EngineError, EngineResult};

/// Maximum attempts at drawing a distinct index pair per swap.
const DISTINCT_PAIR_RETRIES: usize = 10;

/// Variation operators parameterized by application rates.
#[derive(Debug, Clone, Copy)]
pub struct GeneticOperators {
    crossover_rate: f64,
    mutation_rate: f64,
}

impl GeneticOperators {
    /// Creates operators; rates are clamped to [0, 1].
    pub fn new(crossover_rate: f64, mutation_rate: f64) -> Self {
        Self {
            crossover_rate: crossover_rate.clamp(0.0, 1.0),
            mutation_rate: mutation_rate.clamp(0.0, 1.0),
        }
    }

    /// The configured crossover rate.
    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    /// The configured mutation rate.
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Gated single-point crossover.
    ///
    /// Draws one uniform sample; above the crossover rate, returns plain
    /// clones of both parents. Otherwise requires equal gene counts
    /// ([`EngineError::GeneCountMismatch`] — a caller-contract violation,
    /// never recovered internally), picks a cut uniformly in
    /// `[0, gene_count)`, and delegates to
    /// [`crossover_at_point`](Self::crossover_at_point).
    pub fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> EngineResult<(Chromosome, Chromosome)> {
        if rng.random::<f64>() > self.crossover_rate {
            return Ok((parent1.clone(), parent2.clone()));
        }
        check_gene_counts(parent1, parent2)?;
        let n = parent1.gene_count();
        if n == 0 {
            return Ok((parent1.clone(), parent2.clone()));
        }
        let cut = rng.random_range(0..n);
        Self::crossover_at_point(parent1, parent2, cut)
    }

    /// Deterministic single-point crossover at a given cut index.
    ///
    /// Genes before `cut` are copied verbatim from the respective parent.
    /// At and after `cut`, each child's gene keeps its class but takes the
    /// *other* parent's slot for that class, looked up by class id. When
    /// the other parent has no gene for the class, the child keeps its own
    /// parent's slot so it stays complete.
    pub fn crossover_at_point(
        parent1: &Chromosome,
        parent2: &Chromosome,
        cut: usize,
    ) -> EngineResult<(Chromosome, Chromosome)> {
        check_gene_counts(parent1, parent2)?;

        let mut child1 = parent1.clone();
        let mut child2 = parent2.clone();

        for gene in child1.genes_mut().iter_mut().skip(cut) {
            if let Some(other) = parent2.assignment_for_class(&gene.class_id) {
                gene.slot = other.slot;
            }
        }
        for gene in child2.genes_mut().iter_mut().skip(cut) {
            if let Some(other) = parent1.assignment_for_class(&gene.class_id) {
                gene.slot = other.slot;
            }
        }

        Ok((child1, child2))
    }

    /// Gated uniform crossover.
    ///
    /// Same no-op gate as [`crossover`](Self::crossover); otherwise every
    /// gene position draws an independent Bernoulli(`mixing_ratio`) to
    /// decide whether that position's slot is exchanged between the
    /// children, matched by class id.
    pub fn uniform_crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        mixing_ratio: f64,
        rng: &mut R,
    ) -> EngineResult<(Chromosome, Chromosome)> {
        if rng.random::<f64>() > self.crossover_rate {
            return Ok((parent1.clone(), parent2.clone()));
        }
        check_gene_counts(parent1, parent2)?;

        let mixing = mixing_ratio.clamp(0.0, 1.0);
        let mut child1 = parent1.clone();
        let mut child2 = parent2.clone();
        let n = parent1.gene_count();

        let mut exchanged = false;
        for i in 0..n {
            if !rng.random_bool(mixing) {
                continue;
            }
            exchanged = true;
            let class1 = child1.genes()[i].class_id.clone();
            if let Some(other) = parent2.assignment_for_class(&class1) {
                child1.genes_mut()[i].slot = other.slot;
            }
            let class2 = child2.genes()[i].class_id.clone();
            if let Some(other) = parent1.assignment_for_class(&class2) {
                child2.genes_mut()[i].slot = other.slot;
            }
        }

        if exchanged {
            child1.clear_evaluation();
            child2.clear_evaluation();
        }
        Ok((child1, child2))
    }

    /// Gated slot-swap mutation.
    ///
    /// No-op clone when the draw exceeds the mutation rate or fewer than
    /// two movable genes exist. Otherwise two distinct movable gene
    /// indices are drawn (the second redrawn until different) and only
    /// their time slots are exchanged; class-to-gene ownership is
    /// untouched. Genes holding a locked (`is_fixed`) slot are never
    /// selected, so locked assignments survive evolution.
    pub fn mutate<R: Rng>(&self, chromosome: &Chromosome, rng: &mut R) -> Chromosome {
        if rng.random::<f64>() > self.mutation_rate {
            return chromosome.clone();
        }
        let movable = movable_indices(chromosome);
        if movable.len() < 2 {
            return chromosome.clone();
        }
        let i = movable[rng.random_range(0..movable.len())];
        let mut j = movable[rng.random_range(0..movable.len())];
        while j == i {
            j = movable[rng.random_range(0..movable.len())];
        }

        let mut child = chromosome.clone();
        swap_slots(&mut child, i, j);
        child
    }

    /// Gated multi-swap mutation.
    ///
    /// Performs `max(1, min(floor(u·max_swaps) + 1, gene_count / 2))`
    /// independent slot swaps over the movable genes. Each swap retries
    /// the index pair up to ten times; a swap with no distinct pair after
    /// the retries is skipped. Locked (`is_fixed`) genes are never
    /// selected.
    pub fn advanced_mutate<R: Rng>(
        &self,
        chromosome: &Chromosome,
        max_swaps: usize,
        rng: &mut R,
    ) -> Chromosome {
        if rng.random::<f64>() > self.mutation_rate {
            return chromosome.clone();
        }
        let movable = movable_indices(chromosome);
        if movable.len() < 2 {
            return chromosome.clone();
        }
        let n = chromosome.gene_count();
        let requested = (rng.random::<f64>() * max_swaps as f64) as usize + 1;
        let num_swaps = requested.min(n / 2).max(1);

        let mut child = chromosome.clone();
        for _ in 0..num_swaps {
            for _ in 0..DISTINCT_PAIR_RETRIES {
                let i = movable[rng.random_range(0..movable.len())];
                let j = movable[rng.random_range(0..movable.len())];
                if i != j {
                    swap_slots(&mut child, i, j);
                    break;
                }
            }
        }
        child
    }
}

/// Indices of genes whose slot is not locked.
fn movable_indices(chromosome: &Chromosome) -> Vec<usize> {
    chromosome
        .genes()
        .iter()
        .enumerate()
        .filter(|(_, a)| !a.slot.is_fixed)
        .map(|(i, _)| i)
        .collect()
}

fn check_gene_counts(p1: &Chromosome, p2: &Chromosome) -> EngineResult<()> {
    if p1.gene_count() != p2.gene_count() {
        return Err(EngineError::GeneCountMismatch {
            left: p1.gene_count(),
            right: p2.gene_count(),
        });
    }
    Ok(())
}

fn swap_slots(chromosome: &mut Chromosome, i: usize, j: usize) {
    let genes = chromosome.genes_mut();
    let tmp = genes[i].slot;
    genes[i].slot = genes[j].slot;
    genes[j].slot = tmp;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Assignment, Day, TimeSlot};
    use crate::random::create_rng;

    fn parent(slots: &[(Day, u32)]) -> Chromosome {
        Chromosome::from_assignments(
            slots
                .iter()
                .enumerate()
                .map(|(i, &(day, period))| {
                    Assignment::new(format!("class-{i}"), TimeSlot::new(day, period))
                })
                .collect(),
        )
    }

    fn genes_equal(a: &Chromosome, b: &Chromosome) -> bool {
        a.genes() == b.genes()
    }

    #[test]
    fn test_crossover_rate_zero_returns_clones() {
        let ops = GeneticOperators::new(0.0, 0.0);
        let p1 = parent(&[(Day::Monday, 1), (Day::Tuesday, 2), (Day::Wednesday, 3)]);
        let p2 = parent(&[(Day::Thursday, 4), (Day::Friday, 5), (Day::Monday, 6)]);
        let mut rng = create_rng(42);

        for _ in 0..20 {
            let (c1, c2) = ops.crossover(&p1, &p2, &mut rng).unwrap();
            assert!(genes_equal(&c1, &p1));
            assert!(genes_equal(&c2, &p2));
        }
    }

    #[test]
    fn test_crossover_children_are_independent_copies() {
        let ops = GeneticOperators::new(0.0, 0.0);
        let p1 = parent(&[(Day::Monday, 1), (Day::Tuesday, 2)]);
        let p2 = parent(&[(Day::Thursday, 4), (Day::Friday, 5)]);
        let mut rng = create_rng(42);

        let (mut c1, _) = ops.crossover(&p1, &p2, &mut rng).unwrap();
        c1.swap_assignments("class-0", "class-1").unwrap();
        // The parent is untouched by edits to the child.
        assert_eq!(
            p1.assignment_for_class("class-0").unwrap().slot,
            TimeSlot::new(Day::Monday, 1)
        );
    }

    #[test]
    fn test_crossover_mismatched_gene_counts_fails() {
        let ops = GeneticOperators::new(1.0, 0.0);
        let p1 = parent(&[(Day::Monday, 1), (Day::Tuesday, 2)]);
        let p2 = parent(&[(Day::Thursday, 4)]);
        let mut rng = create_rng(42);

        let err = ops.crossover(&p1, &p2, &mut rng).unwrap_err();
        assert_eq!(err, EngineError::GeneCountMismatch { left: 2, right: 1 });

        let err = ops
            .uniform_crossover(&p1, &p2, 0.5, &mut rng)
            .unwrap_err();
        assert_eq!(err, EngineError::GeneCountMismatch { left: 2, right: 1 });
    }

    #[test]
    fn test_crossover_at_point_swaps_by_class_id() {
        // Reference scenario: cut after position 0 leaves the first gene
        // with its own parent and gives every later class the other
        // parent's slot.
        let p1 = parent(&[(Day::Monday, 1), (Day::Tuesday, 2), (Day::Wednesday, 3)]);
        let p2 = parent(&[(Day::Thursday, 4), (Day::Friday, 5), (Day::Monday, 6)]);

        let (c1, c2) = GeneticOperators::crossover_at_point(&p1, &p2, 1).unwrap();

        assert_eq!(c1.genes()[0].slot, TimeSlot::new(Day::Monday, 1));
        assert_eq!(c1.genes()[1].slot, TimeSlot::new(Day::Friday, 5));
        assert_eq!(c1.genes()[2].slot, TimeSlot::new(Day::Monday, 6));

        assert_eq!(c2.genes()[0].slot, TimeSlot::new(Day::Thursday, 4));
        assert_eq!(c2.genes()[1].slot, TimeSlot::new(Day::Tuesday, 2));
        assert_eq!(c2.genes()[2].slot, TimeSlot::new(Day::Wednesday, 3));
    }

    #[test]
    fn test_crossover_at_point_zero_exchanges_everything() {
        let p1 = parent(&[(Day::Monday, 1), (Day::Tuesday, 2), (Day::Wednesday, 3)]);
        let p2 = parent(&[(Day::Thursday, 4), (Day::Friday, 5), (Day::Monday, 6)]);

        let (c1, c2) = GeneticOperators::crossover_at_point(&p1, &p2, 0).unwrap();

        // Child 1 holds parent 2's slot for every class and vice versa.
        for gene in c1.genes() {
            let other = p2.assignment_for_class(&gene.class_id).unwrap();
            assert_eq!(gene.slot, other.slot);
        }
        for gene in c2.genes() {
            let other = p1.assignment_for_class(&gene.class_id).unwrap();
            assert_eq!(gene.slot, other.slot);
        }
    }

    #[test]
    fn test_crossover_keys_by_class_id_not_position() {
        // Parents order their genes differently; the class-id-keyed swap
        // must still produce complete, well-formed children.
        let p1 = Chromosome::from_assignments(vec![
            Assignment::new("a", TimeSlot::new(Day::Monday, 1)),
            Assignment::new("b", TimeSlot::new(Day::Tuesday, 2)),
        ]);
        let p2 = Chromosome::from_assignments(vec![
            Assignment::new("b", TimeSlot::new(Day::Friday, 5)),
            Assignment::new("a", TimeSlot::new(Day::Thursday, 4)),
        ]);

        let (c1, _) = GeneticOperators::crossover_at_point(&p1, &p2, 0).unwrap();
        assert_eq!(
            c1.assignment_for_class("a").unwrap().slot,
            TimeSlot::new(Day::Thursday, 4)
        );
        assert_eq!(
            c1.assignment_for_class("b").unwrap().slot,
            TimeSlot::new(Day::Friday, 5)
        );
    }

    #[test]
    fn test_crossover_children_keep_every_class() {
        let ops = GeneticOperators::new(1.0, 0.0);
        let p1 = parent(&[(Day::Monday, 1), (Day::Tuesday, 2), (Day::Wednesday, 3)]);
        let p2 = parent(&[(Day::Thursday, 4), (Day::Friday, 5), (Day::Monday, 6)]);
        let mut rng = create_rng(42);

        for _ in 0..50 {
            let (c1, c2) = ops.crossover(&p1, &p2, &mut rng).unwrap();
            for c in [&c1, &c2] {
                assert_eq!(c.gene_count(), 3);
                for i in 0..3 {
                    assert!(c.assignment_for_class(&format!("class-{i}")).is_some());
                }
            }
        }
    }

    #[test]
    fn test_uniform_crossover_full_mixing_exchanges_everything() {
        let ops = GeneticOperators::new(1.0, 0.0);
        let p1 = parent(&[(Day::Monday, 1), (Day::Tuesday, 2), (Day::Wednesday, 3)]);
        let p2 = parent(&[(Day::Thursday, 4), (Day::Friday, 5), (Day::Monday, 6)]);
        let mut rng = create_rng(42);

        let (c1, c2) = ops.uniform_crossover(&p1, &p2, 1.0, &mut rng).unwrap();
        assert!(genes_equal(&c1, &p2));
        assert!(genes_equal(&c2, &p1));
    }

    #[test]
    fn test_uniform_crossover_zero_mixing_is_identity() {
        let ops = GeneticOperators::new(1.0, 0.0);
        let p1 = parent(&[(Day::Monday, 1), (Day::Tuesday, 2)]);
        let p2 = parent(&[(Day::Thursday, 4), (Day::Friday, 5)]);
        let mut rng = create_rng(42);

        let (c1, c2) = ops.uniform_crossover(&p1, &p2, 0.0, &mut rng).unwrap();
        assert!(genes_equal(&c1, &p1));
        assert!(genes_equal(&c2, &p2));
    }

    #[test]
    fn test_mutate_rate_zero_is_gene_equal_clone() {
        let ops = GeneticOperators::new(0.0, 0.0);
        let p = parent(&[(Day::Monday, 1), (Day::Tuesday, 2), (Day::Wednesday, 3)]);
        let mut rng = create_rng(42);

        for _ in 0..20 {
            let child = ops.mutate(&p, &mut rng);
            assert!(genes_equal(&child, &p));
        }
    }

    #[test]
    fn test_mutate_rate_one_swaps_exactly_two_slots() {
        let ops = GeneticOperators::new(0.0, 1.0);
        let p = parent(&[
            (Day::Monday, 1),
            (Day::Tuesday, 2),
            (Day::Wednesday, 3),
            (Day::Thursday, 4),
        ]);
        let mut rng = create_rng(42);

        for _ in 0..50 {
            let child = ops.mutate(&p, &mut rng);
            let changed: Vec<usize> = (0..4)
                .filter(|&i| child.genes()[i].slot != p.genes()[i].slot)
                .collect();
            assert_eq!(changed.len(), 2, "exactly two genes change slots");

            // The two changed positions exchanged their slots.
            let (i, j) = (changed[0], changed[1]);
            assert_eq!(child.genes()[i].slot, p.genes()[j].slot);
            assert_eq!(child.genes()[j].slot, p.genes()[i].slot);

            // Class ownership is untouched.
            for i in 0..4 {
                assert_eq!(child.genes()[i].class_id, p.genes()[i].class_id);
            }
        }
    }

    #[test]
    fn test_mutate_single_gene_is_noop() {
        let ops = GeneticOperators::new(0.0, 1.0);
        let p = parent(&[(Day::Monday, 1)]);
        let mut rng = create_rng(42);
        let child = ops.mutate(&p, &mut rng);
        assert!(genes_equal(&child, &p));
    }

    #[test]
    fn test_mutate_never_moves_locked_genes() {
        let ops = GeneticOperators::new(0.0, 1.0);
        let p = Chromosome::from_assignments(vec![
            Assignment::new("a", TimeSlot::new(Day::Monday, 1).fixed()),
            Assignment::new("b", TimeSlot::new(Day::Tuesday, 2)),
            Assignment::new("c", TimeSlot::new(Day::Wednesday, 3)),
            Assignment::new("d", TimeSlot::new(Day::Thursday, 4).fixed()),
        ]);
        let mut rng = create_rng(42);

        for _ in 0..50 {
            let child = ops.mutate(&p, &mut rng);
            assert_eq!(
                child.assignment_for_class("a").unwrap().slot,
                TimeSlot::new(Day::Monday, 1).fixed()
            );
            assert_eq!(
                child.assignment_for_class("d").unwrap().slot,
                TimeSlot::new(Day::Thursday, 4).fixed()
            );

            let child = ops.advanced_mutate(&p, 3, &mut rng);
            assert_eq!(
                child.assignment_for_class("a").unwrap().slot,
                TimeSlot::new(Day::Monday, 1).fixed()
            );
        }
    }

    #[test]
    fn test_mutate_all_locked_is_noop() {
        let ops = GeneticOperators::new(0.0, 1.0);
        let p = Chromosome::from_assignments(vec![
            Assignment::new("a", TimeSlot::new(Day::Monday, 1).fixed()),
            Assignment::new("b", TimeSlot::new(Day::Tuesday, 2).fixed()),
        ]);
        let mut rng = create_rng(42);
        let child = ops.mutate(&p, &mut rng);
        assert!(genes_equal(&child, &p));
        let child = ops.advanced_mutate(&p, 3, &mut rng);
        assert!(genes_equal(&child, &p));
    }

    #[test]
    fn test_advanced_mutate_preserves_slot_multiset() {
        let ops = GeneticOperators::new(0.0, 1.0);
        let p = parent(&[
            (Day::Monday, 1),
            (Day::Tuesday, 2),
            (Day::Wednesday, 3),
            (Day::Thursday, 4),
            (Day::Friday, 5),
            (Day::Monday, 6),
        ]);
        let mut rng = create_rng(42);

        for _ in 0..50 {
            let child = ops.advanced_mutate(&p, 3, &mut rng);
            let mut original: Vec<TimeSlot> = p.genes().iter().map(|a| a.slot).collect();
            let mut mutated: Vec<TimeSlot> = child.genes().iter().map(|a| a.slot).collect();
            original.sort_by_key(|s| (s.day, s.period));
            mutated.sort_by_key(|s| (s.day, s.period));
            assert_eq!(original, mutated, "swaps only permute slots");
        }
    }

    #[test]
    fn test_advanced_mutate_bounds_swap_count() {
        // With 4 genes, at most floor(4/2) = 2 swaps: no more than
        // 4 positions can differ even when max_swaps asks for more.
        let ops = GeneticOperators::new(0.0, 1.0);
        let p = parent(&[
            (Day::Monday, 1),
            (Day::Tuesday, 2),
            (Day::Wednesday, 3),
            (Day::Thursday, 4),
        ]);
        let mut rng = create_rng(42);

        for _ in 0..100 {
            let child = ops.advanced_mutate(&p, 100, &mut rng);
            let changed = (0..4)
                .filter(|&i| child.genes()[i].slot != p.genes()[i].slot)
                .count();
            assert!(changed <= 4);
        }
    }

    #[test]
    fn test_advanced_mutate_rate_zero_is_clone() {
        let ops = GeneticOperators::new(0.0, 0.0);
        let p = parent(&[(Day::Monday, 1), (Day::Tuesday, 2)]);
        let mut rng = create_rng(42);
        let child = ops.advanced_mutate(&p, 5, &mut rng);
        assert!(genes_equal(&child, &p));
    }

    #[test]
    fn test_rates_are_clamped() {
        let ops = GeneticOperators::new(1.7, -0.3);
        assert_eq!(ops.crossover_rate(), 1.0);
        assert_eq!(ops.mutation_rate(), 0.0);
    }

    #[test]
    fn test_operator_outputs_carry_no_stale_evaluation() {
        use crate::engine::Evaluation;

        let ops = GeneticOperators::new(1.0, 1.0);
        let mut p1 = parent(&[(Day::Monday, 1), (Day::Tuesday, 2)]);
        let mut p2 = parent(&[(Day::Thursday, 4), (Day::Friday, 5)]);
        p1.set_evaluation(Evaluation::from_violations(50.0, vec![]));
        p2.set_evaluation(Evaluation::from_violations(60.0, vec![]));
        let mut rng = create_rng(42);

        let (c1, c2) = ops.crossover(&p1, &p2, &mut rng).unwrap();
        assert!(c1.evaluation().is_none());
        assert!(c2.evaluation().is_none());

        let m = ops.mutate(&p1, &mut rng);
        assert!(m.evaluation().is_none());
    }
}
