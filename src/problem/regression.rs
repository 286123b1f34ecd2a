//! Symbolic regression as an engine problem.
//!
//! Binds a [`Dataset`], an operator set, a tree initializer and a loss into
//! the [`Problem`][`crate::cellular::problem::Problem`] interface: random
//! genotypes are grown under a depth cap and size predicate, fitness is the
//! loss of the tree's predictions, minimized.

use std::collections::HashMap;
use std::sync::Arc;

use log::error;
use rand::RngCore;

use crate::cellular::alterer::Alterer;
use crate::cellular::errors::EngineError;
use crate::cellular::objective::Objective;
use crate::cellular::problem::Problem;
use crate::common::traits::{Evaluator, Initializer};
use crate::common::types::VectorFunction;
use crate::dataset::core::Dataset;
use crate::operators::set::Operators;
use crate::tree::core::tree::TreeGenotype;
use crate::tree::fitness::evaluate::MSE;
use crate::tree::operators::crossover::SingleNodeCrossover;
use crate::tree::operators::init::RampedHalfAndHalf;
use crate::tree::operators::mutation::SubtreeMutator;

/// Symbolic regression problem: discover a tree fitting the dataset.
///
/// # Fields
/// * `dataset: Dataset` - samples the trees are scored against
/// * `operators: Arc<Operators>` - node types trees may contain
/// * `map: HashMap<String, (usize, VectorFunction)>` - evaluation lookup,
/// precomputed once
/// * `initializer: RampedHalfAndHalf` - random tree construction scheme
/// * `size_limit: usize` - trees must stay below this node count
/// * `loss: E` - regression loss, minimized
pub struct RegressionProblem<E = MSE>
where
    E: Evaluator<TreeGenotype, D = Dataset> + Send + Sync,
{
    dataset: Dataset,
    operators: Arc<Operators>,
    map: HashMap<String, (usize, VectorFunction)>,
    initializer: RampedHalfAndHalf,
    size_limit: usize,
    loss: E,
}

impl RegressionProblem<MSE> {
    /// Creates a problem scored by mean squared error.
    pub fn new(
        dataset: Dataset, operators: Arc<Operators>,
        initializer: RampedHalfAndHalf, size_limit: usize
    ) -> Self {
        return Self::with_loss(dataset, operators, initializer, size_limit, MSE::new());
    }
}

impl<E> RegressionProblem<E>
where
    E: Evaluator<TreeGenotype, D = Dataset> + Send + Sync,
{
    /// Discarded random trees per genotype request before the size predicate
    /// is declared unsatisfiable.
    const MAX_RETRIES: usize = 100;

    /// Creates a problem with a custom loss.
    pub fn with_loss(
        dataset: Dataset, operators: Arc<Operators>,
        initializer: RampedHalfAndHalf, size_limit: usize, loss: E
    ) -> Self {
        let map = operators.create_map();
        return Self { dataset, operators, map, initializer, size_limit, loss };
    }

    pub fn dataset(&self) -> &Dataset { return &self.dataset; }
    pub fn operators(&self) -> &Arc<Operators> { return &self.operators; }
    pub fn size_limit(&self) -> usize { return self.size_limit; }
}

impl<E> Problem<TreeGenotype> for RegressionProblem<E>
where
    E: Evaluator<TreeGenotype, D = Dataset> + Send + Sync,
{
    fn new_genotype(&self, mut rng: &mut dyn RngCore) -> Result<TreeGenotype, EngineError> {
        for _ in 0..Self::MAX_RETRIES {
            let tree = self.initializer.initialize(&mut rng, &self.operators);
            if tree.size() < self.size_limit { return Ok(tree); }
        }
        error!("Failed to grow a tree below {} nodes in {} attempts", self.size_limit, Self::MAX_RETRIES);
        return Err(EngineError::Configuration(format!(
            "size predicate unsatisfiable: no tree below {} nodes in {} attempts",
            self.size_limit, Self::MAX_RETRIES
        )));
    }

    fn fitness(&self, genotype: &TreeGenotype) -> f64 {
        return self.loss.evaluate(genotype, &self.dataset, &self.map);
    }

    fn objective(&self) -> Objective { return Objective::Minimize; }

    fn is_valid(&self, genotype: &TreeGenotype) -> bool {
        return genotype.size() < self.size_limit;
    }

    fn default_alterers(&self, population_size: usize) -> Vec<Box<dyn Alterer<TreeGenotype>>> {
        let mutation_probability = 1.0 / population_size.max(1) as f64;
        return vec![
            Box::new(SingleNodeCrossover::new(0.1, Arc::clone(&self.operators))
                .expect("Failed to create default SingleNodeCrossover!")),
            Box::new(SubtreeMutator::new(mutation_probability, Arc::clone(&self.operators))
                .expect("Failed to create default SubtreeMutator!")),
        ];
    }
}
