//! Arithmetic failures.

use thiserror::Error;

/// Errors raised by exact arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// A division whose divisor is exactly zero.
    #[error("division by zero")]
    DivByZero,
}
