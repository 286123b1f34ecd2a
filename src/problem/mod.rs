//! Problem bindings for the cellular engine.
//!
//! This module provides:
//! - [`regression`] - Symbolic regression over a sample dataset

pub mod regression;
