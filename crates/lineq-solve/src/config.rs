//! Solver configuration.

use lineq_integers::Rational;
use num_traits::Zero;

/// Configuration for [`LinEqSolver`](crate::LinEqSolver).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Coefficients and constants with a magnitude strictly below this value
    /// are replaced by zero before pivot decisions.
    pub near_zero_threshold: Rational,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            near_zero_threshold: Rational::from_i64(1, 100_000),
        }
    }
}

impl SolverConfig {
    /// Creates a configuration with the given zap threshold.
    #[must_use]
    pub fn with_near_zero_threshold(near_zero_threshold: Rational) -> Self {
        Self {
            near_zero_threshold,
        }
    }

    /// A configuration that never zaps. Results are then exact.
    #[must_use]
    pub fn exact() -> Self {
        Self::with_near_zero_threshold(Rational::zero())
    }
}
