//! The bridge between the solver and the host's symbol table.

use lineq_integers::Rational;
use lineq_poly::VarId;

/// Host-supplied collaborator that knows what the variable ids mean.
///
/// Inside the solver a variable such as `x[2].r` is only its id. The resolver
/// turns ids back into names for diagnostics, receives the value of every
/// variable the moment it becomes known, and tells the solver which variables
/// have gone out of scope.
///
/// Callbacks run synchronously while the solver is mid-update; they must not
/// call back into the solver.
pub trait VariableResolver {
    /// Returns the host-level name of a variable, e.g. `"x[2].r"`.
    fn name_of(&self, vid: VarId) -> String;

    /// Called exactly once per variable, when its value is determined.
    fn notify_solved(&mut self, vid: VarId, value: &Rational);

    /// Returns true if the variable has gone out of scope (a capsule).
    ///
    /// Capsules are never chosen as pivots if another variable is available
    /// and are removed from the solver opportunistically.
    fn is_capsule(&self, vid: VarId) -> bool {
        let _ = vid;
        false
    }
}

impl<R: VariableResolver + ?Sized> VariableResolver for Box<R> {
    fn name_of(&self, vid: VarId) -> String {
        (**self).name_of(vid)
    }

    fn notify_solved(&mut self, vid: VarId, value: &Rational) {
        (**self).notify_solved(vid, value);
    }

    fn is_capsule(&self, vid: VarId) -> bool {
        (**self).is_capsule(vid)
    }
}

impl<R: VariableResolver + ?Sized> VariableResolver for &mut R {
    fn name_of(&self, vid: VarId) -> String {
        (**self).name_of(vid)
    }

    fn notify_solved(&mut self, vid: VarId, value: &Rational) {
        (**self).notify_solved(vid, value);
    }

    fn is_capsule(&self, vid: VarId) -> bool {
        (**self).is_capsule(vid)
    }
}
