//! Error types of the cellular engine.

use std::error::Error;
use std::fmt;

/// Errors surfacing from engine construction or a generation step.
///
/// # Variants
/// * `Configuration(String)` - malformed engine configuration: empty graph,
/// out-of-range neighbor ids, population-size mismatch, unsatisfiable
/// genotype predicate. Fatal at construction or stream start; no retry.
/// * `Worker { cell, message }` - a per-cell or per-phenotype task failed.
/// Fatal to the current generation; no partial result is returned.
#[derive(Debug)]
pub enum EngineError {
    Configuration(String),
    Worker { cell: usize, message: String },
}

impl Error for EngineError {}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Configuration(message)
                => write!(f, "Invalid engine configuration: {}", message),
            EngineError::Worker { cell, message }
                => write!(f, "Worker failed at cell {}: {}", cell, message),
        }
    }
}
