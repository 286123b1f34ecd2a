//! Validity checking and repair of phenotypes.

use std::sync::Arc;

use log::debug;
use rand::RngCore;

use crate::cellular::errors::EngineError;
use crate::cellular::phenotype::Phenotype;
use crate::cellular::problem::Problem;
use crate::common::traits::Genotype;

/// Interface for phenotype constraints.
///
/// Invalid phenotypes never reach evaluation: the engine repairs them at the
/// start of each generation.
pub trait Constraint<G: Genotype>: Send + Sync {
    /// Returns true iff the phenotype may stay in the population.
    fn is_valid(&self, phenotype: &Phenotype<G>) -> bool;

    /// Produces a replacement for an invalid phenotype.
    ///
    /// # Arguments
    /// * `rng: &mut dyn RngCore` - random source
    /// * `phenotype: &Phenotype<G>` - the invalid phenotype
    /// * `generation: usize` - generation the replacement is born at
    fn repair(
        &self, rng: &mut dyn RngCore,
        phenotype: &Phenotype<G>, generation: usize
    ) -> Result<Phenotype<G>, EngineError>;
}

/// Default constraint: validity is the problem's genotype predicate, repair
/// regenerates a fresh random phenotype at the given generation.
pub struct RetryConstraint<G: Genotype> {
    problem: Arc<dyn Problem<G>>,
}

impl<G: Genotype> RetryConstraint<G> {
    pub fn new(problem: Arc<dyn Problem<G>>) -> Self {
        return Self { problem };
    }
}

impl<G: Genotype> Constraint<G> for RetryConstraint<G> {
    fn is_valid(&self, phenotype: &Phenotype<G>) -> bool {
        return self.problem.is_valid(phenotype.genotype());
    }

    fn repair(
        &self, rng: &mut dyn RngCore,
        phenotype: &Phenotype<G>, generation: usize
    ) -> Result<Phenotype<G>, EngineError> {
        debug!("Repairing invalid phenotype born at generation {}", phenotype.generation());
        return Ok(Phenotype::new(self.problem.new_genotype(rng)?, generation));
    }
}
