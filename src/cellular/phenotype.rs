//! Individuals of a cellular population.

#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

use crate::common::traits::Genotype;

/// A genotype together with its birth generation and, once evaluated, its
/// fitness.
///
/// Fitness starts absent and is filled in exactly once by the evaluator;
/// alterers emit offspring with absent fitness. The age of a phenotype at
/// generation `g` is `g - generation`.
///
/// # Fields
/// * `genotype: G` - the evolving program
/// * `generation: usize` - generation the phenotype was created at
/// * `fitness: Option<f64>` - scalar fitness, absent until evaluated
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct Phenotype<G: Genotype> {
    genotype: G,
    generation: usize,
    fitness: Option<f64>,
}

impl<G: Genotype> Phenotype<G> {
    /// Creates new unevaluated phenotype born at given generation.
    pub fn new(genotype: G, generation: usize) -> Self {
        return Self { genotype, generation, fitness: None };
    }

    /// Creates evaluated phenotype with the given fitness.
    pub fn with_fitness(genotype: G, generation: usize, fitness: f64) -> Self {
        return Self { genotype, generation, fitness: Some(fitness) };
    }

    pub fn genotype(&self) -> &G { return &self.genotype; }
    pub fn generation(&self) -> usize { return self.generation; }
    pub fn fitness(&self) -> Option<f64> { return self.fitness; }

    pub fn is_evaluated(&self) -> bool { return self.fitness.is_some(); }

    /// Returns age of phenotype at the given generation.
    pub fn age(&self, generation: usize) -> usize {
        return generation.saturating_sub(self.generation);
    }

    /// Fills in the fitness. The evaluator is the only caller; a phenotype is
    /// scored at most once.
    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        debug_assert!(self.fitness.is_none(), "Phenotype evaluated twice!");
        self.fitness = Some(fitness);
    }
}
