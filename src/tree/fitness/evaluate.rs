//! Evaluation functions for Genetic Programming.
//!
//! This module provides evaluators for GP algorithms designed for assessing
//! fitness of [`TreeGenotype`][`crate::tree::core::tree::TreeGenotype`]
//! against a [`Dataset`][`crate::dataset::core::Dataset`].
//!
//! Currently implemented:
//! - Mean Squared Error (MSE) - the primary loss, minimized
//! - Root Mean Squared Error (RMSE)
//!
//! Any non-finite pointwise error makes the whole fitness `+inf`, so trees
//! that divide by zero or overflow lose every comparison under minimization.
use std::collections::HashMap;

use crate::common::traits::{Data, Evaluator};
use crate::common::types::VectorFunction;
use crate::dataset::core::Dataset;
use crate::tree::core::tree::TreeGenotype;

/// Evaluates tree on every sample row at once.
///
/// The arena is walked in reverse so that each node sees its operand columns
/// on top of the stack in child order. Node labels resolve in order: registry
/// function, feature column, constant literal; anything else becomes a `NaN`
/// column and is isolated by the loss.
///
/// # Returns
/// * `Option<Vec<f64>>` - prediction column, or `None` for a malformed arena
fn predict(
    tree: &TreeGenotype, dataset: &Dataset,
    map: &HashMap<String, (usize, VectorFunction)>
) -> Option<Vec<f64>> {
    let (features, targets) = dataset.data();
    let n_samples = targets.len();

    let mut stack: Vec<Vec<f64>> = Vec::new();
    for i in (0..tree.arena().len()).rev() {
        let node = &tree.arena()[i];

        if let Some((arity, op)) = map.get(node) {
            match arity {
                0 => {
                    let operands = features.iter().map(|v| v.as_slice()).collect::<Vec<&[f64]>>();
                    stack.push(op(&operands));
                },
                n => {
                    let mut columns = Vec::with_capacity(*n);
                    for _ in 0..*n {
                        columns.push(stack.pop()?);
                    }
                    let operands = columns.iter().map(|v| v.as_slice()).collect::<Vec<&[f64]>>();
                    stack.push(op(&operands));
                },
            }
        } else if let Some(column) = dataset.feature_index(node) {
            stack.push(features[column].clone());
        } else if let Ok(value) = node.parse::<f64>() {
            stack.push(vec![value; n_samples]);
        } else {
            stack.push(vec![f64::NAN; n_samples]);
        }
    }
    return stack.pop();
}

/// Sums squared pointwise errors; `+inf` as soon as any error is non-finite
/// or the prediction column does not line up with the targets.
fn squared_error_sum(predictions: &[f64], targets: &[f64]) -> f64 {
    if predictions.len() != targets.len() { return f64::INFINITY; }

    let mut sum = 0.0;
    for (prediction, target) in predictions.iter().zip(targets.iter()) {
        let squared = (prediction - target).powi(2);
        if !squared.is_finite() { return f64::INFINITY; }
        sum += squared;
    }
    return sum;
}

/// Mean Squared Error (MSE) evaluator that computes fitness as average squared
/// difference between predicted and actual values.
///
/// # Examples
/// ```
/// use cellforge::tree::fitness::evaluate::MSE;
///
/// let evaluator = MSE::default(); // Empty just for method encapsulation
/// ```
pub struct MSE {}

impl MSE {
    pub fn new() -> Self { return Self {}; }
}

impl Default for MSE {
    fn default() -> Self { return Self::new(); }
}

impl Evaluator<TreeGenotype> for MSE {
    type D = Dataset;

    fn evaluate(&self,
            tree: &TreeGenotype, dataset: &Self::D,
            map: &HashMap<String, (usize, VectorFunction)>
        ) -> f64 {
        let (_, targets) = dataset.data();

        let predictions = match predict(tree, dataset, map) {
            Some(predictions) => predictions,
            None => return f64::INFINITY,
        };
        let sum = squared_error_sum(&predictions, targets);
        return sum / (targets.len() as f64);
    }
}

/// Root Mean Square Error (RMSE) evaluator that computes fitness as square
/// root of average squared difference between predicted and actual values.
///
/// # Examples
/// ```
/// use cellforge::tree::fitness::evaluate::RMSE;
///
/// let evaluator = RMSE::default(); // Empty just for method encapsulation
/// ```
pub struct RMSE {}

impl RMSE {
    pub fn new() -> Self { return Self {}; }
}

impl Default for RMSE {
    fn default() -> Self { return Self::new(); }
}

impl Evaluator<TreeGenotype> for RMSE {
    type D = Dataset;

    fn evaluate(&self,
        tree: &TreeGenotype, dataset: &Self::D,
        map: &HashMap<String, (usize, VectorFunction)>
    ) -> f64 {
        let (_, targets) = dataset.data();

        let predictions = match predict(tree, dataset, map) {
            Some(predictions) => predictions,
            None => return f64::INFINITY,
        };
        let sum = squared_error_sum(&predictions, targets);
        return (sum / (targets.len() as f64)).sqrt();
    }
}
