//! Tree mutation operators for Genetic Programming.
//!
//! This module provides mutation operators for tree-based GP designed for
//! manipulating [`TreeGenotype`][`crate::tree::core::tree::TreeGenotype`]
//! structure. Also serves as a template for custom mutation operators.

use std::sync::Arc;

use rand::{Rng, RngCore};
use log::{error, debug};

use crate::cellular::alterer::Alterer;
use crate::cellular::phenotype::Phenotype;
use crate::common::traits::Initializer;
use crate::operators::set::Operators;
use crate::tree::core::tree::TreeGenotype;
use crate::tree::operators::init::Grow;
use crate::tree::operators::errors::MutationError;

/// Substitutes a subtree at the given mutation point with a new subtree.
///
/// # Arguments
/// * `individual: &TreeGenotype` - original tree
/// * `subtree: &TreeGenotype` - new subtree to insert
/// * `mutation_point: usize` - index where substitution occurs
///
/// # Returns
/// * `Vec<String>` - new tree arena after substitution
fn substitute(individual: &TreeGenotype, subtree: &TreeGenotype, mutation_point: usize)
    -> Vec<String> {
    let mutation_end = individual.subtree(mutation_point);

    let mut new_arena = individual.arena()[0..mutation_point].to_vec();
    new_arena.extend(subtree.arena().iter().cloned());
    new_arena.extend(individual.arena()[mutation_end+1..].iter().cloned());

    return new_arena;
}

/// Traditional subtree mutation operator that replaces a randomly selected
/// subtree with a new one generated using the Grow initialization method.
///
/// The replacement is grown no deeper than the subtree it replaces, so
/// mutation never increases the depth of a tree. Size may still grow; trees
/// that outgrow the configured size predicate are repaired by the engine's
/// constraint at the start of the next generation.
///
/// # Fields:
/// * `probability: f64` - Mutation probability (0.0 to 1.0)
/// * `operators: Arc<Operators>` - operator set to draw replacement nodes from
pub struct SubtreeMutator {
    probability: f64,
    operators: Arc<Operators>,
}

impl SubtreeMutator {
    /// Creates new SubtreeMutator operator.
    ///
    /// # Arguments
    /// * `probability: f64` - mutation probability (0.0 to 1.0)
    /// * `operators: Arc<Operators>` - operator set of the problem
    ///
    /// # Returns
    /// * `Result<Self, MutationError>` - new operator or error if probability invalid
    pub fn new(probability: f64, operators: Arc<Operators>) -> Result<Self, MutationError> {
        if !(0.0..=1.0).contains(&probability) {
            error!("Attempted to create SubtreeMutator with invalid probability: {}", probability);
            return Err(MutationError::InvalidProbability(probability));
        }
        return Ok(Self { probability, operators });
    }

    fn mutate<R: Rng>(&self, rng: &mut R, individual: &TreeGenotype, generation: usize) -> Phenotype<TreeGenotype> {
        let mutation_point = rng.gen_range(0..individual.arena().len());

        let depths = individual.node_depths();
        let subtree_end = individual.subtree(mutation_point);
        let subtree_depth = depths[mutation_point..=subtree_end].iter()
            .map(|depth| depth - depths[mutation_point])
            .max()
            .unwrap_or(0);

        let init_scheme = Grow::new(0, subtree_depth);
        let subtree = init_scheme.initialize(rng, &self.operators);

        let arena = substitute(individual, &subtree, mutation_point);
        let mut tree = TreeGenotype::with_arena(arena);
        *tree.children_mut() = tree.construct_children(&self.operators);

        debug!("Completed mutation: original size {} -> mutant size {}", individual.arena().len(), tree.arena().len());
        return Phenotype::new(tree, generation);
    }
}

impl Alterer<TreeGenotype> for SubtreeMutator {
    fn alter(
        &self, mut rng: &mut dyn RngCore,
        parents: &[Phenotype<TreeGenotype>], generation: usize
    ) -> (Vec<Phenotype<TreeGenotype>>, usize) {
        let mut offspring = Vec::with_capacity(parents.len());
        let mut altered = 0;

        for phenotype in parents {
            if rng.gen::<f64>() > self.probability {
                offspring.push(phenotype.clone());
                continue;
            }
            offspring.push(self.mutate(&mut rng, phenotype.genotype(), generation));
            altered += 1;
        }
        return (offspring, altered);
    }
}

/// Point mutation operator (aka node replacement mutation) that replaces a
/// randomly selected node with another node of the same arity.
///
/// # Fields:
/// * `probability: f64` - Mutation probability (0.0 to 1.0)
/// * `operators: Arc<Operators>` - operator set to draw replacement nodes from
pub struct PointMutation {
    probability: f64,
    operators: Arc<Operators>,
}

impl PointMutation {
    /// Creates new PointMutation operator.
    ///
    /// # Arguments
    /// * `probability: f64` - mutation probability (0.0 to 1.0)
    /// * `operators: Arc<Operators>` - operator set of the problem
    ///
    /// # Returns
    /// * `Result<Self, MutationError>` - new operator or error if probability invalid
    pub fn new(probability: f64, operators: Arc<Operators>) -> Result<Self, MutationError> {
        if !(0.0..=1.0).contains(&probability) {
            error!("Attempted to create PointMutation with invalid probability: {}", probability);
            return Err(MutationError::InvalidProbability(probability));
        }
        return Ok(Self { probability, operators });
    }

    fn mutate<R: Rng>(&self, rng: &mut R, individual: &TreeGenotype, generation: usize) -> Phenotype<TreeGenotype> {
        let mutation_point = rng.gen_range(0..individual.arena().len());
        let arity = self.operators.arity_of(&individual.arena()[mutation_point]);

        let new_node = if arity == 0 {
            self.operators.sample_terminal(rng)
        } else {
            self.operators.sample_function_with_arity(rng, arity)
                .unwrap_or_else(|| individual.arena()[mutation_point].clone())
        };

        let mut arena = individual.arena().clone();
        arena[mutation_point] = new_node;
        let mut tree = TreeGenotype::with_arena(arena);
        *tree.children_mut() = tree.construct_children(&self.operators);

        return Phenotype::new(tree, generation);
    }
}

impl Alterer<TreeGenotype> for PointMutation {
    fn alter(
        &self, mut rng: &mut dyn RngCore,
        parents: &[Phenotype<TreeGenotype>], generation: usize
    ) -> (Vec<Phenotype<TreeGenotype>>, usize) {
        let mut offspring = Vec::with_capacity(parents.len());
        let mut altered = 0;

        for phenotype in parents {
            if rng.gen::<f64>() > self.probability {
                offspring.push(phenotype.clone());
                continue;
            }
            offspring.push(self.mutate(&mut rng, phenotype.genotype(), generation));
            altered += 1;
        }
        return (offspring, altered);
    }
}
