//! Solver failures.

use lineq_integers::{ArithmeticError, Rational};
use thiserror::Error;

/// Errors returned by [`LinEqSolver`](crate::LinEqSolver).
///
/// A failing call leaves the solver exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SolverError {
    /// The equation contradicts what is already known; after substituting
    /// all known values it reads `residue = 0` with a non-zero residue.
    #[error("inconsistent equation: equation off by {residue}")]
    InconsistentEquation {
        /// The non-zero constant the equation reduced to.
        residue: Rational,
    },

    /// A division by zero, either while building the equation (the
    /// polynomial was flagged invalid) or while solving it.
    #[error("division by zero")]
    DivByZero,

    /// An equation was added before a resolver was attached.
    #[error("no variable resolver attached")]
    ResolverMissing,
}

impl From<ArithmeticError> for SolverError {
    fn from(err: ArithmeticError) -> Self {
        match err {
            ArithmeticError::DivByZero => Self::DivByZero,
        }
    }
}
