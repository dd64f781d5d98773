//! # lineq-solve
//!
//! An online solver for systems of linear equations.
//!
//! Equations are added one at a time. After each one the solver knows, for
//! every variable it has seen, either its value, a linear expression of
//! still-free variables that it equals, or nothing. Values are reported to a
//! host [`VariableResolver`] the moment they become known.
//!
//! # Example
//!
//! ```ignore
//! use lineq_integers::Rational;
//! use lineq_poly::LinearPoly;
//! use lineq_solve::{LinEqSolver, VarValue};
//!
//! let mut solver = LinEqSolver::new().with_resolver(resolver);
//!
//! // 100 - 2a = 0
//! let eq = LinearPoly::constant(Rational::from(100)).with_term(1, Rational::from(-2));
//! solver.add_equation(eq)?;
//! assert_eq!(solver.value_of(1), VarValue::Solved(Rational::from(50)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod resolver;
pub mod solver;

#[cfg(test)]
mod proptests;

pub use config::SolverConfig;
pub use error::SolverError;
pub use resolver::VariableResolver;
pub use solver::{LinEqSolver, VarValue};
