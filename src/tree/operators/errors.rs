//! Error types used across operator implementations.

use std::fmt;
use std::error::Error;

/// Errors that can occur during mutation operations.
///
/// # Variants
/// * `InvalidProbability(f64)` - mutation probability outside [0.0, 1.0] range
#[derive(Debug)]
pub enum MutationError {
    InvalidProbability(f64),
}

impl Error for MutationError {}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MutationError::InvalidProbability(probability)
                => write!(f, "Invalid mutation probability: {}", probability),
        }
    }
}

/// Errors that can occur during crossover operations.
///
/// # Variants
/// * `InvalidProbability(f64)` - crossover probability outside [0.0, 1.0] range
#[derive(Debug)]
pub enum CrossoverError {
    InvalidProbability(f64)
}

impl Error for CrossoverError {}

impl fmt::Display for CrossoverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossoverError::InvalidProbability(probability)
                => write!(f, "Invalid crossover probability: {}", probability),
        }
    }
}
