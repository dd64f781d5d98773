//! # lineq-integers
//!
//! Exact arithmetic for the lineq equation solver.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - Arbitrary precision rationals (`Rational`), the coefficient type of
//!   every polynomial and every solution
//!
//! Values never lose exactness. Near-zero residues are only removed on
//! request, through [`Rational::zap`] and a caller-supplied threshold.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod integer;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use error::ArithmeticError;
pub use integer::Integer;
pub use rational::Rational;
