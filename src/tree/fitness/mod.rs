//! Fitness evaluation for tree-based Genetic Programming.
//!
//! This module provides:
//! - [`evaluate`] - Tree evaluation and regression loss functions

pub mod evaluate;
