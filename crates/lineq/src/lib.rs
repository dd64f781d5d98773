//! # lineq
//!
//! An online solver for systems of linear equations, in the style of the
//! equation machinery of a MetaFont-like drawing language.
//!
//! Equations arrive one at a time. The solver keeps every variable either
//! solved, dependent on free variables, or unknown, and calls back into the
//! host as soon as a value is determined.
//!
//! ## Crates
//!
//! - [`integers`]: exact integer and rational arithmetic
//! - [`poly`]: sparse linear polynomials
//! - [`solve`]: the equation store and the resolver callback
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lineq::prelude::*;
//!
//! struct Names;
//!
//! impl VariableResolver for Names {
//!     fn name_of(&self, vid: VarId) -> String {
//!         format!("p{vid}")
//!     }
//!
//!     fn notify_solved(&mut self, vid: VarId, value: &Rational) {
//!         println!("p{vid} = {value}");
//!     }
//! }
//!
//! let mut solver = LinEqSolver::new().with_resolver(Names);
//! // p1 + p2 = 10, p1 - p2 = 4
//! solver.add_equation(LinearPoly::new(Rational::from(-10), [(1, Rational::from(1)), (2, Rational::from(1))]))?;
//! solver.add_equation(LinearPoly::new(Rational::from(-4), [(1, Rational::from(1)), (2, Rational::from(-1))]))?;
//! // prints p2 = 3, then p1 = 7
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use lineq_integers as integers;
pub use lineq_poly as poly;
pub use lineq_solve as solve;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use lineq_integers::{ArithmeticError, Integer, Rational};
    pub use lineq_poly::{LinearPoly, VarId, CONSTANT_TERM};
    pub use lineq_solve::{
        LinEqSolver, SolverConfig, SolverError, VarValue, VariableResolver,
    };
}
