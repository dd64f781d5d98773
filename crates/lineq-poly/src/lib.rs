//! # lineq-poly
//!
//! Sparse linear polynomials over exact rationals.
//!
//! A [`LinearPoly`] stands for the left-hand side of an equation `p = 0`, or,
//! inside the solver, for the right-hand side of a dependency `x = p`.
//! Variables are opaque [`VarId`]s chosen by the host; the solver never
//! interprets them beyond ordering.
//!
//! Pure operations (`add`, `sub`, `scale`, `divide`, `substitute`) return
//! fresh polynomials. Their in-place counterparts (`+=`, `-=`,
//! `scale_in_place`, `divide_in_place`, `substitute_in_place`) mutate the
//! receiver.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod linear;

#[cfg(test)]
mod proptests;

pub use linear::LinearPoly;

/// Identifier of a variable. Chosen by the host, opaque to the solver.
pub type VarId = u32;

/// Reserved id carrying the constant term of every polynomial.
pub const CONSTANT_TERM: VarId = 0;
