//! Tree crossover operators for Genetic Programming.
//!
//! This module provides crossover operators for tree-based GP designed for
//! manipulating [`TreeGenotype`][`crate::tree::core::tree::TreeGenotype`]
//! structure. Also serves as a template for custom crossover operators.

use std::sync::Arc;

use rand::{Rng, RngCore};
use log::{error, debug};

use crate::cellular::alterer::Alterer;
use crate::cellular::phenotype::Phenotype;
use crate::operators::set::Operators;
use crate::tree::core::tree::TreeGenotype;
use crate::tree::operators::errors::CrossoverError;

/// Crossover operator that picks a single node position in each parent and
/// swaps the subtrees rooted there.
///
/// Fires with the configured probability; otherwise the parents pass through
/// unchanged, fitness included. Fired crossovers return both children with
/// absent fitness.
///
/// # Fields
/// * `probability: f64` - Crossover probability (0.0 to 1.0)
/// * `operators: Arc<Operators>` - operator set used to rebuild child trees
pub struct SingleNodeCrossover {
    probability: f64,
    operators: Arc<Operators>,
}

impl SingleNodeCrossover {
    /// Creates new SingleNodeCrossover operator.
    ///
    /// # Arguments
    /// * `probability: f64` - crossover probability (0.0 to 1.0)
    /// * `operators: Arc<Operators>` - operator set of the problem
    ///
    /// # Returns
    /// * `Result<Self, CrossoverError>` - instance of Self or an
    /// [`error`][`crate::tree::operators::errors::CrossoverError`]
    pub fn new(probability: f64, operators: Arc<Operators>) -> Result<Self, CrossoverError> {
        if !(0.0..=1.0).contains(&probability) {
            error!("Attempted to create SingleNodeCrossover with invalid probability: {}", probability);
            return Err(CrossoverError::InvalidProbability(probability));
        }
        return Ok(Self { probability, operators });
    }

    /// Swaps subtrees between parents at specified crossover points.
    ///
    /// # Arguments
    /// * `parents: (&TreeGenotype, &TreeGenotype)` - parent trees for crossover
    /// * `crossover_points: (usize, usize)` - indices where subtree swap occurs
    ///
    /// # Returns
    /// * `Vec<Vec<String>>` - arenas of two offspring after subtree swap
    fn swap(parents: (&TreeGenotype, &TreeGenotype), crossover_points: (usize, usize))
        -> Vec<Vec<String>> {
        let (parent1, parent2) = parents;
        let (xo_point1, xo_point2) = crossover_points;

        let sub_end1 = parent1.subtree(xo_point1);
        let sub_end2 = parent2.subtree(xo_point2);

        let subtree1 = &parent1.arena()[xo_point1..=sub_end1];
        let subtree2 = &parent2.arena()[xo_point2..=sub_end2];

        let mut tree1 = parent1.arena()[..xo_point1].to_vec();
        tree1.extend_from_slice(subtree2);
        tree1.extend_from_slice(&parent1.arena()[sub_end1+1..]);

        let mut tree2 = parent2.arena()[..xo_point2].to_vec();
        tree2.extend_from_slice(subtree1);
        tree2.extend_from_slice(&parent2.arena()[sub_end2+1..]);

        return vec![tree1, tree2];
    }
}

impl Alterer<TreeGenotype> for SingleNodeCrossover {
    fn alter(
        &self, rng: &mut dyn RngCore,
        parents: &[Phenotype<TreeGenotype>], generation: usize
    ) -> (Vec<Phenotype<TreeGenotype>>, usize) {
        if parents.is_empty() { return (Vec::new(), 0); }

        if rng.gen::<f64>() > self.probability {
            debug!("Skipping crossover..");
            return (parents.to_vec(), 0);
        }

        let parent1 = parents[0].genotype();
        let parent2 = parents.get(1).unwrap_or(&parents[0]).genotype();

        let crossover_points = (
            rng.gen_range(0..parent1.arena().len()),
            rng.gen_range(0..parent2.arena().len())
        );
        let arenas = Self::swap((parent1, parent2), crossover_points);

        let mut children = Vec::with_capacity(arenas.len());
        for arena in arenas {
            let mut child = TreeGenotype::with_arena(arena);
            *child.children_mut() = child.construct_children(&self.operators);
            children.push(Phenotype::new(child, generation));
        }
        let altered = children.len();

        debug!("Completed crossover at points ({}, {})", crossover_points.0, crossover_points.1);
        return (children, altered);
    }
}
