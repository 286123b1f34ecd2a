//! The engine-facing problem interface.

use rand::RngCore;

use crate::cellular::alterer::Alterer;
use crate::cellular::errors::EngineError;
use crate::cellular::objective::Objective;
use crate::common::traits::Genotype;

/// Binds genotype construction and scoring into one interface the engine can
/// consume.
///
/// Fitness must be a deterministic, total function of the genotype: the
/// engine evaluates each distinct phenotype instance at most once and may do
/// so from any worker thread. Pathological evaluations are expected to come
/// back as the worst value of the problem's objective rather than as errors.
pub trait Problem<G: Genotype>: Send + Sync {
    /// Creates new random genotype respecting the problem's depth cap and
    /// size predicate.
    ///
    /// # Arguments
    /// * `rng: &mut dyn RngCore` - random source
    ///
    /// # Returns
    /// * `Result<G, EngineError>` - new genotype, or a configuration error
    /// when the predicate cannot be satisfied
    fn new_genotype(&self, rng: &mut dyn RngCore) -> Result<G, EngineError>;

    /// Scores a genotype. Deterministic and total.
    fn fitness(&self, genotype: &G) -> f64;

    /// Direction the fitness is optimized in.
    fn objective(&self) -> Objective { return Objective::Maximize; }

    /// Validity predicate over genotypes, used by the engine's default
    /// constraint. Accepts everything unless overridden.
    fn is_valid(&self, _genotype: &G) -> bool { return true; }

    /// Alterers the engine falls back to when none are configured.
    fn default_alterers(&self, _population_size: usize) -> Vec<Box<dyn Alterer<G>>> {
        return Vec::new();
    }
}
