//! Property-based tests for the equation store.
//!
//! Systems are generated from a hidden integer assignment, so every system
//! is consistent and every solved value must equal its hidden value.

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use lineq_integers::Rational;
    use lineq_poly::{LinearPoly, VarId};
    use proptest::prelude::*;

    use crate::{LinEqSolver, SolverConfig, SolverError, VariableResolver};

    #[derive(Default)]
    struct Recorder {
        notified: Vec<(VarId, Rational)>,
    }

    impl VariableResolver for Recorder {
        fn name_of(&self, vid: VarId) -> String {
            format!("v{vid}")
        }

        fn notify_solved(&mut self, vid: VarId, value: &Rational) {
            self.notified.push((vid, value.clone()));
        }
    }

    type Hidden = BTreeMap<VarId, Rational>;

    fn equation(row: &[i64], hidden: &Hidden) -> LinearPoly {
        let terms: Vec<(VarId, Rational)> = (1u32..)
            .zip(row)
            .map(|(vid, &c)| (vid, Rational::from(c)))
            .collect();
        let lhs = terms
            .iter()
            .fold(Rational::from(0), |acc, (vid, c)| acc + c * &hidden[vid]);
        LinearPoly::new(-lhs, terms)
    }

    // A consistent system in 2 to 5 variables, in two orders.
    fn system() -> impl Strategy<Value = (Hidden, Vec<LinearPoly>, Vec<LinearPoly>)> {
        (2usize..=5)
            .prop_flat_map(|k| {
                (
                    proptest::collection::vec(-5i64..=5, k),
                    proptest::collection::vec(proptest::collection::vec(-10i64..=10, k), 1..=7),
                )
            })
            .prop_flat_map(|(values, rows)| {
                let hidden: Hidden = (1u32..).zip(values).map(|(v, n)| (v, Rational::from(n))).collect();
                let eqs: Vec<LinearPoly> = rows.iter().map(|row| equation(row, &hidden)).collect();
                (Just(hidden), Just(eqs.clone()), Just(eqs).prop_shuffle())
            })
    }

    fn solve(eqs: &[LinearPoly]) -> LinEqSolver<Recorder> {
        let mut solver =
            LinEqSolver::with_config(SolverConfig::exact()).with_resolver(Recorder::default());
        for eq in eqs {
            solver
                .add_equation(eq.clone())
                .expect("consistent system must not fail");
        }
        solver
    }

    fn check_store(solver: &LinEqSolver<Recorder>, hidden: &Hidden) -> Result<(), TestCaseError> {
        let solved: BTreeSet<VarId> = solver.solved_values().map(|(vid, _)| vid).collect();
        let dependent: BTreeSet<VarId> = solver.dependencies().map(|(vid, _)| vid).collect();
        prop_assert!(solved.is_disjoint(&dependent));

        for (vid, rhs) in solver.dependencies() {
            for v in rhs.variables() {
                prop_assert!(!solved.contains(&v), "v{} = {} mentions a solved variable", vid, rhs);
                prop_assert!(!dependent.contains(&v), "v{} = {} mentions a dependent", vid, rhs);
            }
            prop_assert!(!rhs.is_constant());
            prop_assert_eq!(&rhs.evaluate(|v| hidden[&v].clone()), &hidden[&vid]);
        }

        for (vid, value) in solver.solved_values() {
            prop_assert_eq!(value, &hidden[&vid]);
        }

        let notified = &solver.resolver().expect("resolver attached").notified;
        let once: BTreeSet<VarId> = notified.iter().map(|(vid, _)| *vid).collect();
        prop_assert_eq!(once.len(), notified.len(), "duplicate notification");
        prop_assert_eq!(&once, &solved);
        for (vid, value) in notified {
            prop_assert_eq!(value, &hidden[vid]);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn consistent_systems_respect_invariants((hidden, eqs, _) in system()) {
            let solver = solve(&eqs);
            check_store(&solver, &hidden)?;
        }

        #[test]
        fn solved_set_does_not_depend_on_order((hidden, eqs, shuffled) in system()) {
            let first = solve(&eqs);
            let second = solve(&shuffled);
            check_store(&second, &hidden)?;

            let a: BTreeSet<VarId> = first.solved_values().map(|(vid, _)| vid).collect();
            let b: BTreeSet<VarId> = second.solved_values().map(|(vid, _)| vid).collect();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn repeating_an_equation_changes_nothing((hidden, eqs, _) in system()) {
            let mut solver = solve(&eqs);
            let before = solver.dump();
            for eq in &eqs {
                solver.add_equation(eq.clone()).expect("redundant equation");
            }
            prop_assert_eq!(solver.dump(), before);
            check_store(&solver, &hidden)?;
        }

        #[test]
        fn contradiction_leaves_store_unchanged(
            (hidden, eqs, _) in system(),
            offset in prop_oneof![(-9i64..=-1), (1i64..=9)],
        ) {
            let mut solver = solve(&eqs);
            let before = solver.dump();
            // shift the constant of an equation the store already implies
            let mut bad = eqs[0].clone();
            bad.set_constant(bad.constant_term() + &Rational::from(offset));
            prop_assert_eq!(
                solver.add_equation(bad),
                Err(SolverError::InconsistentEquation { residue: Rational::from(offset) })
            );
            prop_assert_eq!(solver.dump(), before);
            check_store(&solver, &hidden)?;
        }
    }
}
