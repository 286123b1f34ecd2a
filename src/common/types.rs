//! Common type definitions used across the codebase.

/// Function type for vectorized operations on data.
///
/// # Arguments
/// * `&[&[f64]]` - slice of operand vectors, one per argument
///
/// # Returns
/// * `Vec<f64>` - result of vectorized operation
pub type VectorFunction = fn(&[&[f64]]) -> Vec<f64>;
