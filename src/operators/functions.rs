//! Functions for symbolic regression.
//!
//! This module provides:
//! - Generic trait for floating point operations
//! - Basic arithmetic operators (+, -, *, /)
//! - Trigonometric functions (sin, cos)
//! - Natural logarithm
//!
//! Operators are deliberately unprotected: division by zero, overflow and
//! out-of-domain arguments produce `±inf`/`NaN`, and the loss functions map
//! any non-finite pointwise error to a worst-value fitness. Pathological
//! trees lose every comparison instead of being silently repaired.
pub mod symbolic {
    use std::cmp::PartialOrd;
    use std::ops::{Add, Sub, Mul, Div};

    /// Trait for abstracting over floating point types in symbolic expressions.
    pub trait Float: Copy + PartialOrd {
        /// Computes sine
        fn sin(self) -> Self;
        /// Computes cosine
        fn cos(self) -> Self;
        /// Computes natural logarithm
        fn ln(self) -> Self;
    }

    impl Float for f32 {
        fn sin(self) -> Self { return self.sin(); }
        fn cos(self) -> Self { return self.cos(); }
        fn ln(self) -> Self { return self.ln(); }
    }

    impl Float for f64 {
        fn sin(self) -> Self { return self.sin(); }
        fn cos(self) -> Self { return self.cos(); }
        fn ln(self) -> Self { return self.ln(); }
    }

    /// Helper type aliases for operator functions
    type UnaryOp<T> = fn(T) -> T;
    type BinaryOp<T> = fn(T, T) -> T;

    /// Applies unary operation to vector of values
    fn apply_unary<T: Float>(op: UnaryOp<T>, args: &[&[T]]) -> Vec<T> {
        if args.len() != 1 || args[0].is_empty() {
            return Vec::new();
        }
        return args[0].iter().map(|&a| op(a)).collect();
    }

    /// Applies binary operation to paired values from two vectors
    fn apply_binary<T: Float>(op: BinaryOp<T>, args: &[&[T]]) -> Vec<T> {
        if args.len() != 2 || args[0].is_empty() || args[1].is_empty() {
            return Vec::new();
        }
        return args[0].iter().zip(args[1].iter())
            .map(|(&a, &b)| op(a, b))
            .collect();
    }

    /// Addition operator
    pub fn add<T: Add<Output = T> + Float>(args: &[&[T]]) -> Vec<T> {
        return apply_binary(|a, b| a + b, args);
    }

    /// Subtraction operator
    pub fn sub<T: Sub<Output = T> + Float>(args: &[&[T]]) -> Vec<T> {
        return apply_binary(|a, b| a - b, args);
    }

    /// Multiplication operator
    pub fn mul<T: Mul<Output = T> + Float>(args: &[&[T]]) -> Vec<T> {
        return apply_binary(|a, b| a * b, args);
    }

    /// Division operator. Division by zero yields `±inf`/`NaN`.
    pub fn div<T: Div<Output = T> + Float>(args: &[&[T]]) -> Vec<T> {
        return apply_binary(|a, b| a / b, args);
    }

    /// Sine operator
    pub fn sin<T: Float>(args: &[&[T]]) -> Vec<T> {
        return apply_unary(|a| a.sin(), args);
    }

    /// Cosine operator
    pub fn cos<T: Float>(args: &[&[T]]) -> Vec<T> {
        return apply_unary(|a| a.cos(), args);
    }

    /// Natural logarithm
    pub fn ln<T: Float>(args: &[&[T]]) -> Vec<T> {
        return apply_unary(|a| a.ln(), args);
    }
}

use crate::operators::builder::{BuilderError, OperatorsBuilder};
use symbolic::{add, sub, mul, div, sin, cos};

/// Creates standard Koza function set for symbolic regression.
///
/// The six functions are weighted uniformly; the caller adds terminals
/// (variables, constants, ephemerals) before building.
///
/// # Returns
/// * `Result<OperatorsBuilder, BuilderError>` - builder including Koza functions
pub fn koza() -> Result<OperatorsBuilder, BuilderError> {
    let koza = OperatorsBuilder::default()
        .add_function("+", add, 2, 1.0 / 6.0)?
        .add_function("-", sub, 2, 1.0 / 6.0)?
        .add_function("*", mul, 2, 1.0 / 6.0)?
        .add_function("/", div, 2, 1.0 / 6.0)?
        .add_function("sin", sin, 1, 1.0 / 6.0)?
        .add_function("cos", cos, 1, 1.0 / 6.0)?;

    return Ok(koza);
}
