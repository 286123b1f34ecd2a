//! Operator sets for managing GP node types.
//!
//! This module provides structures for:
//! - Wrapping functions with their arities and weights
//! - Terminal nodes: variables, constants and ephemeral constants
//! - Weighted sampling of nodes during tree construction
//!
//! Functions and terminals are drawn from separate weighted distributions,
//! precomputed once at build time. Function order is the builder's insertion
//! order, so a seeded run samples identically across processes.

use std::collections::HashMap;

use rand::{Rng, RngCore};
use rand::distributions::{Distribution, WeightedIndex};

use crate::common::types::VectorFunction;

/// Closure type for ephemeral constant generators.
///
/// The closure draws from the random source it is handed, so a seeded run
/// materializes identical constants regardless of where the draw happens.
pub type EphemeralFn = Box<dyn Fn(&mut dyn RngCore) -> f64 + Send + Sync>;

/// Wrapper for operator function with metadata.
///
/// # Fields
/// * `func: VectorFunction` - [`function`][`crate::common::types::VectorFunction`] implementing
/// the operator
/// * `arity: usize` - number of arguments operator takes
/// * `weight: f64` - sampling weight for operator
#[derive(Clone)]
pub struct Functor {
    func: VectorFunction,
    arity: usize,
    weight: f64
}

impl Functor {
    pub fn new(func: VectorFunction, arity: usize, weight: f64) -> Self { return Self { func, arity, weight }; }

    pub fn arity(&self) -> usize { return self.arity; }
    pub fn weight(&self) -> f64 { return self.weight; }
    pub fn func(&self) -> &VectorFunction { return &self.func; }
}

/// Terminal node kinds: leaves of an expression tree.
///
/// # Variants
/// * `Variable(String)` - named input feature, resolved to a sample column at evaluation
/// * `Constant(f64)` - fixed numeric value
/// * `Ephemeral(EphemeralFn)` - generator sampled once per created node, frozen thereafter
pub enum NodeType {
    Variable(String),
    Constant(f64),
    Ephemeral(EphemeralFn),
}

impl NodeType {
    /// Materializes terminal into an arena label.
    ///
    /// Ephemeral generators are invoked here; the drawn value becomes part of
    /// the tree's identity and is never re-sampled.
    pub fn materialize<R: Rng>(&self, rng: &mut R) -> String {
        match self {
            NodeType::Variable(name) => return name.clone(),
            NodeType::Constant(value) => return format!("{}", value),
            NodeType::Ephemeral(generator) => return format!("{}", generator(rng)),
        }
    }
}

/// Container for functions and terminals with weighted sampling.
///
/// # Fields
/// * `functions: HashMap<String, Functor>` - map of function names to functors
/// * `function_names: Vec<String>` - function names in builder insertion order
/// * `function_dist: WeightedIndex<f64>` - distribution over `function_names`
/// * `terminals: Vec<NodeType>` - list of terminal nodes
/// * `terminal_dist: WeightedIndex<f64>` - distribution over `terminals`
pub struct Operators {
    functions: HashMap<String, Functor>,
    function_names: Vec<String>,
    function_dist: WeightedIndex<f64>,
    terminals: Vec<NodeType>,
    terminal_dist: WeightedIndex<f64>,
}

impl Operators {
    pub(crate) fn new(
        functions: HashMap<String, Functor>,
        function_names: Vec<String>,
        function_dist: WeightedIndex<f64>,
        terminals: Vec<NodeType>,
        terminal_dist: WeightedIndex<f64>
    ) -> Self {
        return Self { functions, function_names, function_dist, terminals, terminal_dist };
    }

    pub fn functions(&self) -> &HashMap<String, Functor> { return &self.functions; }
    pub fn terminals(&self) -> &Vec<NodeType> { return &self.terminals; }

    /// Returns arity of the node with given arena label. Terminals and
    /// constant literals have arity 0.
    pub fn arity_of(&self, label: &str) -> usize {
        if let Some(functor) = self.functions.get(label) { return functor.arity(); }
        return 0;
    }

    /// Returns highest arity among registered functions.
    pub fn max_arity(&self) -> usize {
        return self.functions.values().map(|functor| functor.arity()).max().unwrap_or(0);
    }

    /// Samples random function node.
    ///
    /// # Returns
    /// * `(String, usize)` - (function name, arity) tuple
    pub fn sample_function<R: Rng>(&self, rng: &mut R) -> (String, usize) {
        let name = &self.function_names[self.function_dist.sample(rng)];
        return (name.clone(), self.functions[name].arity());
    }

    /// Samples random function node of the given arity, weight-proportional
    /// among the matching functions.
    ///
    /// # Returns
    /// * `Option<String>` - function name, or `None` when no function has
    /// that arity
    pub fn sample_function_with_arity<R: Rng>(&self, rng: &mut R, arity: usize) -> Option<String> {
        let matching: Vec<&String> = self.function_names.iter()
            .filter(|name| self.functions[*name].arity() == arity)
            .collect();
        let total: f64 = matching.iter().map(|name| self.functions[*name].weight()).sum();
        if matching.is_empty() || total <= 0.0 { return None; }

        let mut draw = rng.gen::<f64>() * total;
        for name in &matching {
            let weight = self.functions[*name].weight();
            if draw < weight { return Some((*name).clone()); }
            draw -= weight;
        }
        return Some((*matching[matching.len() - 1]).clone());
    }

    /// Samples random terminal node and materializes its arena label.
    pub fn sample_terminal<R: Rng>(&self, rng: &mut R) -> String {
        let index = self.terminal_dist.sample(rng);
        return self.terminals[index].materialize(rng);
    }

    /// Creates map of functions with their arities and implementations.
    /// Required for tree evaluations.
    pub fn create_map(&self) -> HashMap<String, (usize, VectorFunction)> {
        let mut map = HashMap::new();
        for (key, value) in &self.functions {
            map.insert(key.clone(), (value.arity(), *value.func()));
        }
        return map;
    }
}
