//! The online linear equation store.
//!
//! Equations arrive one at a time as polynomials asserted equal to zero.
//! The store keeps everything it has learned in solved form:
//!
//! - *dependencies* `x = p`, where `p` mentions only free variables, and
//! - *solutions* `x = c` for variables whose value is known.
//!
//! A new equation is reduced against both tables, then either dropped as
//! redundant, rejected as inconsistent, or solved for its pivot variable,
//! the coefficient of largest magnitude. The pivot's new right-hand side is
//! substituted into every dependency; dependencies that collapse to a
//! constant become solutions in turn, and the resolver hears about each one.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

use lineq_integers::Rational;
use lineq_poly::{LinearPoly, VarId, CONSTANT_TERM};
use num_traits::Zero;
use tracing::{debug, info, warn};

use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::resolver::VariableResolver;

/// What the solver knows about a variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VarValue {
    /// The variable has a known value.
    Solved(Rational),
    /// The variable equals this polynomial of free variables.
    Dependent(LinearPoly),
    /// Nothing is known, or the variable has gone out of scope.
    Unknown,
}

/// A system of linear equations, solved incrementally.
///
/// # Invariants
///
/// - no variable is both solved and dependent
/// - right-hand sides never mention a dependent or a solved variable
/// - every variable is reported to the resolver at most once
pub struct LinEqSolver<R> {
    /// Dependent variable → right-hand side.
    dependents: BTreeMap<VarId, LinearPoly>,
    /// Solved variable → value.
    solved: BTreeMap<VarId, Rational>,
    resolver: Option<R>,
    config: SolverConfig,
}

impl<R: VariableResolver> Default for LinEqSolver<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: VariableResolver> LinEqSolver<R> {
    /// Creates an empty solver with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    /// Creates an empty solver.
    #[must_use]
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            dependents: BTreeMap::new(),
            solved: BTreeMap::new(),
            resolver: None,
            config,
        }
    }

    /// Builder form of [`LinEqSolver::attach_resolver`].
    #[must_use]
    pub fn with_resolver(mut self, resolver: R) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Binds the resolver, returning the previous one.
    pub fn attach_resolver(&mut self, resolver: R) -> Option<R> {
        self.resolver.replace(resolver)
    }

    /// The attached resolver.
    #[must_use]
    pub fn resolver(&self) -> Option<&R> {
        self.resolver.as_ref()
    }

    /// The attached resolver, mutably.
    pub fn resolver_mut(&mut self) -> Option<&mut R> {
        self.resolver.as_mut()
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Changes the zap threshold for subsequent equations.
    pub fn set_near_zero_threshold(&mut self, eps: Rational) {
        self.config.near_zero_threshold = eps;
    }

    /// Asserts `equation = 0`.
    ///
    /// Solves as far as possible, notifies the resolver of every variable
    /// that becomes known, then harvests capsules.
    ///
    /// # Errors
    ///
    /// - [`SolverError::ResolverMissing`] if no resolver is attached
    /// - [`SolverError::DivByZero`] if `equation` was flagged invalid
    /// - [`SolverError::InconsistentEquation`] if the equation contradicts
    ///   what is already known
    ///
    /// On error nothing changes.
    pub fn add_equation(&mut self, equation: LinearPoly) -> Result<(), SolverError> {
        self.add_eq(equation)?;
        self.harvest_capsules();
        debug!("{self}");
        Ok(())
    }

    /// Asserts several equations in order.
    ///
    /// Capsules are harvested once, after the last equation, so equations
    /// that share a capsule keep their common relation.
    ///
    /// # Errors
    ///
    /// Stops at the first failing equation and returns its error. Equations
    /// before it stay in effect; the failing one has no effect.
    pub fn add_equations<I>(&mut self, equations: I) -> Result<(), SolverError>
    where
        I: IntoIterator<Item = LinearPoly>,
    {
        let mut outcome = Ok(());
        for (index, equation) in equations.into_iter().enumerate() {
            debug!(index, "adding equation from batch");
            if let Err(err) = self.add_eq(equation) {
                outcome = Err(err);
                break;
            }
        }
        self.harvest_capsules();
        debug!("{self}");
        outcome
    }

    fn add_eq(&mut self, equation: LinearPoly) -> Result<(), SolverError> {
        if self.resolver.is_none() {
            return Err(SolverError::ResolverMissing);
        }
        if !equation.is_valid() {
            return Err(SolverError::DivByZero);
        }
        info!("# 0 = {}", self.poly_string(&equation));

        let reduced = self.reduce(equation);
        if let Some(residue) = reduced.constant_value() {
            if residue.is_zero() {
                debug!("redundant equation");
                return Ok(());
            }
            warn!("equation off by {residue}");
            return Err(SolverError::InconsistentEquation {
                residue: residue.clone(),
            });
        }

        let (pivot, coeff) = self.choose_pivot(&reduced);
        assert!(
            pivot != CONSTANT_TERM && !coeff.is_zero(),
            "no pivot in non-constant equation"
        );
        // 0 = c·x + rest  =>  x = rest / -c
        let mut rhs = reduced;
        rhs.set_term(pivot, Rational::zero());
        rhs.divide_in_place(&-coeff)?;
        rhs.zap(&self.config.near_zero_threshold);
        self.settle(pivot, rhs);
        Ok(())
    }

    /// Substitutes every known variable of `p`, then zaps.
    fn reduce(&self, mut p: LinearPoly) -> LinearPoly {
        while let Some(vid) = self.first_known(&p) {
            if let Some(value) = self.solved.get(&vid) {
                p.substitute_in_place(vid, &LinearPoly::constant(value.clone()));
            } else if let Some(rhs) = self.dependents.get(&vid) {
                p.substitute_in_place(vid, rhs);
            }
        }
        p.zapped(&self.config.near_zero_threshold)
    }

    fn first_known(&self, p: &LinearPoly) -> Option<VarId> {
        p.variables()
            .find(|vid| self.solved.contains_key(vid) || self.dependents.contains_key(vid))
    }

    /// Largest coefficient among non-capsules; among capsules only if
    /// nothing else is left.
    fn choose_pivot(&self, p: &LinearPoly) -> (VarId, Rational) {
        let candidate =
            p.max_abs_coeff(|vid| self.dependents.contains_key(&vid) || self.is_capsule(vid));
        if candidate.0 == CONSTANT_TERM {
            p.max_abs_coeff(|_| false)
        } else {
            candidate
        }
    }

    /// Records `vid = rhs` and propagates it.
    fn settle(&mut self, vid: VarId, rhs: LinearPoly) {
        if let Some(value) = rhs.constant_value() {
            let value = value.clone();
            self.install_solution(vid, value.clone());
            self.propagate(vid, LinearPoly::constant(value));
        } else {
            info!("## {} = {}", self.var_string(vid), self.poly_string(&rhs));
            self.propagate(vid, rhs.clone());
            self.dependents.insert(vid, rhs);
        }
    }

    fn install_solution(&mut self, vid: VarId, value: Rational) {
        info!("#### {} = {value}", self.var_string(vid));
        if let Some(resolver) = self.resolver.as_mut() {
            resolver.notify_solved(vid, &value);
        }
        self.solved.insert(vid, value);
    }

    /// Substitutes `vid := value` into every dependency.
    ///
    /// Dependencies that become constant are solved and substituted in turn,
    /// breadth first, each round in ascending id order.
    fn propagate(&mut self, vid: VarId, value: LinearPoly) {
        let eps = self.config.near_zero_threshold.clone();
        let mut pending = VecDeque::from([(vid, value)]);

        while let Some((known, value)) = pending.pop_front() {
            let mut collapsed = Vec::new();
            let resolver = self.resolver.as_ref();
            for (&dependent, rhs) in &mut self.dependents {
                if !rhs.contains(known) {
                    continue;
                }
                rhs.substitute_in_place(known, &value);
                rhs.zap(&eps);
                debug!(
                    "{} = {}",
                    name_with(resolver, dependent),
                    render_with(resolver, rhs)
                );
                if let Some(c) = rhs.constant_value() {
                    collapsed.push((dependent, c.clone()));
                }
            }
            for (dependent, c) in collapsed {
                self.dependents.remove(&dependent);
                self.install_solution(dependent, c.clone());
                pending.push_back((dependent, LinearPoly::constant(c)));
            }
        }
    }

    /// Returns what is known about `vid`.
    ///
    /// Capsules are reported as unknown.
    #[must_use]
    pub fn value_of(&self, vid: VarId) -> VarValue {
        if self.is_capsule(vid) {
            return VarValue::Unknown;
        }
        if let Some(value) = self.solved.get(&vid) {
            return VarValue::Solved(value.clone());
        }
        self.dependents
            .get(&vid)
            .map_or(VarValue::Unknown, |rhs| VarValue::Dependent(rhs.clone()))
    }

    /// Removes a variable that has gone out of scope.
    ///
    /// A solution or a dependency keyed by `vid` is dropped. If `vid` occurs
    /// on right-hand sides, it is eliminated through the first dependency
    /// mentioning it: `y = c·vid + rest` becomes `vid = (y - rest)/c`, `y`
    /// turns free and the expression replaces `vid` everywhere else. Unknown
    /// ids are ignored.
    pub fn capsule(&mut self, vid: VarId) {
        if vid == CONSTANT_TERM {
            return;
        }
        if self.solved.remove(&vid).is_some() {
            debug!("capsule {} unsolved", self.var_string(vid));
        }
        if self.dependents.remove(&vid).is_some() {
            debug!("capsule {} no longer dependent", self.var_string(vid));
        }

        let holder = self
            .dependents
            .iter()
            .find(|(_, rhs)| rhs.contains(vid))
            .map(|(&key, _)| key);
        let Some(holder) = holder else {
            return;
        };
        let Some(mut rest) = self.dependents.remove(&holder) else {
            return;
        };
        let c = rest.coeff(vid);
        rest.set_term(vid, Rational::zero());
        let mut expr = LinearPoly::var(holder);
        expr -= &rest;
        expr.scale_in_place(&c.recip());
        debug!(
            "capsule {} = {} eliminated",
            self.var_string(vid),
            self.poly_string(&expr)
        );
        self.propagate(vid, expr);
    }

    /// Capsules every variable the resolver reports as out of scope.
    pub fn harvest_capsules(&mut self) {
        let Some(resolver) = self.resolver.as_ref() else {
            return;
        };
        let referenced: BTreeSet<VarId> = self
            .solved
            .keys()
            .copied()
            .chain(
                self.dependents
                    .iter()
                    .flat_map(|(&key, rhs)| std::iter::once(key).chain(rhs.variables())),
            )
            .collect();
        let capsules: Vec<VarId> = referenced
            .into_iter()
            .filter(|&vid| resolver.is_capsule(vid))
            .collect();
        for vid in capsules {
            self.capsule(vid);
        }
    }

    /// Returns true if `vid` has a known value.
    #[must_use]
    pub fn is_solved(&self, vid: VarId) -> bool {
        self.solved.contains_key(&vid)
    }

    /// Returns true if `vid` is the left-hand side of a dependency.
    #[must_use]
    pub fn is_dependent(&self, vid: VarId) -> bool {
        self.dependents.contains_key(&vid)
    }

    /// Solved variables in ascending id order.
    pub fn solved_values(&self) -> impl Iterator<Item = (VarId, &Rational)> + '_ {
        self.solved.iter().map(|(vid, value)| (*vid, value))
    }

    /// Dependencies in ascending id order.
    pub fn dependencies(&self) -> impl Iterator<Item = (VarId, &LinearPoly)> + '_ {
        self.dependents.iter().map(|(vid, rhs)| (*vid, rhs))
    }

    /// Multi-line listing of all dependencies and solutions.
    #[must_use]
    pub fn dump(&self) -> String {
        self.to_string()
    }

    /// Name of a variable, `x.<id>` without a resolver.
    #[must_use]
    pub fn var_string(&self, vid: VarId) -> String {
        name_with(self.resolver.as_ref(), vid)
    }

    /// Renders a polynomial with resolver names.
    #[must_use]
    pub fn poly_string(&self, p: &LinearPoly) -> String {
        render_with(self.resolver.as_ref(), p)
    }

    fn is_capsule(&self, vid: VarId) -> bool {
        self.resolver.as_ref().is_some_and(|r| r.is_capsule(vid))
    }
}

fn name_with<R: VariableResolver>(resolver: Option<&R>, vid: VarId) -> String {
    resolver.map_or_else(|| format!("x.{vid}"), |r| r.name_of(vid))
}

fn render_with<R: VariableResolver>(resolver: Option<&R>, p: &LinearPoly) -> String {
    p.render(|vid| name_with(resolver, vid))
}

impl<R: VariableResolver> fmt::Display for LinEqSolver<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dependents:")?;
        for (vid, rhs) in &self.dependents {
            writeln!(f, "\t{} = {}", self.var_string(*vid), self.poly_string(rhs))?;
        }
        writeln!(f, "Solved:")?;
        for (vid, value) in &self.solved {
            writeln!(f, "\t{} = {value}", self.var_string(*vid))?;
        }
        Ok(())
    }
}

impl<R> fmt::Debug for LinEqSolver<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinEqSolver")
            .field("dependents", &self.dependents)
            .field("solved", &self.solved)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
