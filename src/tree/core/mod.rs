//! Core tree structures.
//!
//! This module provides:
//! - [`tree`] - The arena-based tree genotype

pub mod tree;
