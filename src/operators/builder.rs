//! Builder for creating operator sets with all node types.
//!
//! This module provides a builder for creating operator sets that include all
//! types of nodes:
//! - Functions with names and arities
//! - Variables (input features)
//! - Constants (fixed numeric values)
//! - Ephemeral constant generators

use std::collections::HashMap;

use log::{error, info};
use rand::distributions::WeightedIndex;

use crate::operators::set::{EphemeralFn, Functor, NodeType, Operators};
use crate::common::types::VectorFunction;

/// Errors that can occur during operator set building.
///
/// # Variants
/// * `IncorrectWeight` - weight not in (0, 1] range
/// * `KeyExists` - function with given name already exists
/// * `OperatorsIsEmpty` - no functions or no terminals added to builder
/// * `WrongWeightSum` - weights don't sum to 1.0
#[derive(Debug)]
pub enum BuilderError {
    IncorrectWeight,
    KeyExists,
    OperatorsIsEmpty,
    WrongWeightSum
}

impl std::error::Error for BuilderError {}
impl std::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncorrectWeight => write!(f, "IncorrectWeight"),
            Self::KeyExists => write!(f, "KeyExists"),
            Self::OperatorsIsEmpty => write!(f, "OperatorsIsEmpty"),
            Self::WrongWeightSum => write!(f, "WrongWeightSum"),
        }
    }
}

/// Builder for creating validated operator sets with all node types.
///
/// Functions are kept in insertion order so that two builds with the same
/// calls produce sampling distributions with identical index layouts; a
/// seeded run depends on that layout.
///
/// # Fields
/// * `functions: Vec<(String, Functor)>` - functions in insertion order
/// * `terminals: Vec<NodeType>` - list of terminal nodes
/// * `terminal_weights: Vec<f64>` - sampling weights of terminals
/// * `function_weights_sum: f64` - running sum of function weights
/// * `terminal_weights_sum: f64` - running sum of terminal weights
pub struct OperatorsBuilder {
    functions: Vec<(String, Functor)>,
    terminals: Vec<NodeType>,
    terminal_weights: Vec<f64>,
    function_weights_sum: f64,
    terminal_weights_sum: f64,
}

impl OperatorsBuilder {
    /// Adds new function operator to the set.
    ///
    /// # Arguments
    /// * `name: &str` - operator name
    /// * `func: VectorFunction` - operator function
    /// * `arity: usize` - number of arguments
    /// * `weight: f64` - sampling weight
    ///
    /// # Returns
    /// * `Result<Self, BuilderError>` - updated builder or [`error`][`BuilderError`]
    pub fn add_function(mut self, name: &str, func: VectorFunction, arity: usize, weight: f64)
        -> Result<Self, BuilderError> {
            if weight <= 0.0 || weight > 1.0 {
                error!("Attempted to add function {} with invalid weight: {}", name, weight);
                return Err(BuilderError::IncorrectWeight);
            }
            if self.functions.iter().any(|(key, _)| key == name) { return Err(BuilderError::KeyExists); }

            self.functions.push((name.to_string(), Functor::new(func, arity, weight)));
            self.function_weights_sum += weight;

            return Ok(self);
    }

    /// Adds variable terminal to the set.
    pub fn add_variable(mut self, name: &str, weight: f64) -> Result<Self, BuilderError> {
        if weight <= 0.0 || weight > 1.0 {
            error!("Attempted to add variable {} with invalid weight: {}", name, weight);
            return Err(BuilderError::IncorrectWeight);
        }

        self.terminals.push(NodeType::Variable(name.to_string()));
        self.terminal_weights.push(weight);
        self.terminal_weights_sum += weight;

        return Ok(self);
    }

    /// Adds constant terminal to the set.
    pub fn add_constant(mut self, value: f64, weight: f64) -> Result<Self, BuilderError> {
        if weight <= 0.0 || weight > 1.0 {
            error!("Attempted to add constant {} with invalid weight: {}", value, weight);
            return Err(BuilderError::IncorrectWeight);
        }

        self.terminals.push(NodeType::Constant(value));
        self.terminal_weights.push(weight);
        self.terminal_weights_sum += weight;

        return Ok(self);
    }

    /// Adds ephemeral random constant generator to the set.
    pub fn add_ephemeral(mut self, generator: EphemeralFn, weight: f64) -> Result<Self, BuilderError> {
        if weight <= 0.0 || weight > 1.0 {
            error!("Attempted to add ephemeral generator with invalid weight: {}", weight);
            return Err(BuilderError::IncorrectWeight);
        }

        self.terminals.push(NodeType::Ephemeral(generator));
        self.terminal_weights.push(weight);
        self.terminal_weights_sum += weight;

        return Ok(self);
    }

    /// Builds final operator set with validation.
    ///
    /// # Returns
    /// * `Result<Operators, BuilderError>` - valid [`operator set`][Operators] or
    /// [`error`][`BuilderError`]
    pub fn build(self) -> Result<Operators, BuilderError> {
        if self.functions.is_empty() { return Err(BuilderError::OperatorsIsEmpty); }
        if (self.function_weights_sum - 1.0).abs() > 1e-10 { return Err(BuilderError::WrongWeightSum); }
        if self.terminals.is_empty() { return Err(BuilderError::OperatorsIsEmpty); }
        if (self.terminal_weights_sum - 1.0).abs() > 1e-10 { return Err(BuilderError::WrongWeightSum); }

        let function_names: Vec<String> = self.functions.iter()
            .map(|(name, _)| name.clone())
            .collect();
        let function_weights: Vec<f64> = self.functions.iter()
            .map(|(_, functor)| functor.weight())
            .collect();
        let function_dist = WeightedIndex::new(&function_weights)
            .map_err(|_| BuilderError::IncorrectWeight)?;
        let terminal_dist = WeightedIndex::new(&self.terminal_weights)
            .map_err(|_| BuilderError::IncorrectWeight)?;

        info!("Built operator set with {} functions and {} terminals",
            self.functions.len(), self.terminals.len()
        );
        let functions: HashMap<String, Functor> = self.functions.into_iter().collect();
        return Ok(Operators::new(
            functions,
            function_names,
            function_dist,
            self.terminals,
            terminal_dist
        ));
    }
}

impl Default for OperatorsBuilder {
    fn default() -> Self {
        return Self {
            functions: Vec::new(),
            terminals: Vec::new(),
            terminal_weights: Vec::new(),
            function_weights_sum: 0.0,
            terminal_weights_sum: 0.0,
        };
    }
}
