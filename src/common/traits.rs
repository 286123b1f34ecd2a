//! Core traits defining GP components.
//!
//! The traits here cover the genotype side of the system: construction of
//! random individuals and scoring them against data. Population-level
//! machinery (selection, alteration, constraints) lives in
//! [`cellular`][`crate::cellular`] because it operates on phenotypes.

use std::collections::HashMap;

use rand::Rng;

use crate::common::types::VectorFunction;
use crate::operators::set::Operators;

/// Marker trait for genotypes.
///
/// Genotypes are value types: they are cloned freely between generations and
/// shared read-only across worker threads.
pub trait Genotype: Clone + Send + Sync {}

/// Interface for creating random genotypes.
pub trait Initializer<G: Genotype> {
    /// Creates new random genotype.
    ///
    /// # Arguments
    /// * `rng: &mut R` - random source
    /// * `operators: &Operators` - operator set to draw nodes from
    ///
    /// # Returns
    /// * `G` - new genotype
    fn initialize<R: Rng>(&self, rng: &mut R, operators: &Operators) -> G;
}

/// Interface for fitness evaluation of a genotype against a dataset.
pub trait Evaluator<G: Genotype> {
    type D: Data;

    /// Evaluates genotype against dataset.
    ///
    /// # Arguments
    /// * `genotype: &G` - genotype to evaluate
    /// * `dataset: &Self::D` - data to evaluate against
    /// * `map: &HashMap<String, (usize, VectorFunction)>` - mapping of
    /// function names to their arities and implementations
    ///
    /// # Returns
    /// * `f64` - fitness value
    fn evaluate(&self,
        genotype: &G, dataset: &Self::D,
        map: &HashMap<String, (usize, VectorFunction)>
    ) -> f64;
}

/// Interface for datasets usable in evaluation.
pub trait Data {
    /// Returns feature names and target name.
    fn names(&self) -> (&Vec<String>, &String);
    /// Returns feature vectors and target vector.
    fn data(&self) -> (&Vec<Vec<f64>>, &Vec<f64>);
}
