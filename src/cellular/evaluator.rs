//! Population fitness evaluation.
//!
//! Fills in the fitness of every phenotype that lacks one and leaves the
//! rest untouched; order is preserved, so index `i` stays node `i`. Because
//! fitness is a pure function of the genotype, the jobs run through the
//! engine's executor in parallel. Evaluating an already evaluated population
//! is a no-op, so the call is idempotent.

use crate::cellular::errors::EngineError;
use crate::cellular::executor::Executor;
use crate::cellular::phenotype::Phenotype;
use crate::cellular::problem::Problem;
use crate::common::traits::Genotype;

/// Evaluates all unevaluated phenotypes of a population.
///
/// # Arguments
/// * `executor: &Executor` - execution strategy for the scoring jobs
/// * `problem: &dyn Problem<G>` - scoring function
/// * `population: Vec<Phenotype<G>>` - population to evaluate
///
/// # Returns
/// * `Result<Vec<Phenotype<G>>, EngineError>` - same population, same order,
/// every phenotype evaluated
pub fn eval<G: Genotype>(
    executor: &Executor,
    problem: &dyn Problem<G>,
    mut population: Vec<Phenotype<G>>
) -> Result<Vec<Phenotype<G>>, EngineError> {
    let jobs: Vec<usize> = population.iter().enumerate()
        .filter(|(_, phenotype)| !phenotype.is_evaluated())
        .map(|(index, _)| index)
        .collect();
    if jobs.is_empty() { return Ok(population); }

    let population_ref = &population;
    let jobs_ref = &jobs;
    let scores = executor.map_indexed(jobs.len(), move |job| {
        return Ok(problem.fitness(population_ref[jobs_ref[job]].genotype()));
    })?;

    for (job, &index) in jobs.iter().enumerate() {
        population[index].set_fitness(scores[job]);
    }
    return Ok(population);
}
