//! Sparse linear polynomials.
//!
//! A [`LinearPoly`] represents `c₀ + c₁·x₁ + … + cₙ·xₙ`. Variable terms are
//! kept in a small inline vector sorted by ascending [`VarId`]; the constant
//! term lives beside them under the reserved id [`CONSTANT_TERM`] and is
//! always present, even when zero.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{AddAssign, Neg, SubAssign};

use lineq_integers::{ArithmeticError, Rational};
use num_traits::{One, Zero};
use smallvec::SmallVec;

use crate::{VarId, CONSTANT_TERM};

/// Inline capacity for variable terms. Equations of a drawing program rarely
/// mention more than a handful of variables.
const INLINE_TERMS: usize = 4;

type Terms = SmallVec<[(VarId, Rational); INLINE_TERMS]>;

/// A linear polynomial with exact rational coefficients.
///
/// # Invariants
///
/// - variable ids in `terms` are strictly ascending and never `CONSTANT_TERM`
/// - no variable term carries a zero coefficient
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LinearPoly {
    constant: Rational,
    terms: Terms,
    valid: bool,
}

impl Default for LinearPoly {
    fn default() -> Self {
        Self::zero()
    }
}

impl LinearPoly {
    /// Creates a polynomial from a constant and a list of terms.
    ///
    /// Terms are sorted and combined; terms for [`CONSTANT_TERM`] are folded
    /// into the constant and zero coefficients are dropped.
    #[must_use]
    pub fn new<I>(constant: Rational, terms: I) -> Self
    where
        I: IntoIterator<Item = (VarId, Rational)>,
    {
        let mut poly = Self::constant(constant);
        for (vid, c) in terms {
            if vid == CONSTANT_TERM {
                poly.constant = std::mem::take(&mut poly.constant) + c;
            } else {
                let sum = poly.coeff(vid) + c;
                poly.set_term(vid, sum);
            }
        }
        poly
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self::constant(Rational::zero())
    }

    /// Creates a polynomial consisting of a constant term only.
    #[must_use]
    pub fn constant(c: Rational) -> Self {
        Self {
            constant: c,
            terms: SmallVec::new(),
            valid: true,
        }
    }

    /// Creates the polynomial `1·x`.
    ///
    /// # Panics
    ///
    /// Panics if `vid` is the constant id.
    #[must_use]
    pub fn var(vid: VarId) -> Self {
        Self::zero().with_term(vid, Rational::one())
    }

    /// Builder form of [`LinearPoly::set_term`].
    #[must_use]
    pub fn with_term(mut self, vid: VarId, c: Rational) -> Self {
        self.set_term(vid, c);
        self
    }

    /// Inserts or replaces the term for `vid`. A zero coefficient removes it.
    ///
    /// # Panics
    ///
    /// Panics if `vid` is the constant id; use [`LinearPoly::set_constant`].
    pub fn set_term(&mut self, vid: VarId, c: Rational) {
        assert!(vid != CONSTANT_TERM, "x.0 is reserved for the constant term");
        match self.terms.binary_search_by_key(&vid, |(v, _)| *v) {
            Ok(pos) if c.is_zero() => {
                self.terms.remove(pos);
            }
            Ok(pos) => self.terms[pos].1 = c,
            Err(_) if c.is_zero() => {}
            Err(pos) => self.terms.insert(pos, (vid, c)),
        }
    }

    /// Replaces the constant term.
    pub fn set_constant(&mut self, c: Rational) {
        self.constant = c;
    }

    /// Returns the coefficient of `vid`, or zero if the term is absent.
    /// `CONSTANT_TERM` yields the constant.
    #[must_use]
    pub fn coeff(&self, vid: VarId) -> Rational {
        if vid == CONSTANT_TERM {
            return self.constant.clone();
        }
        self.terms
            .binary_search_by_key(&vid, |(v, _)| *v)
            .map_or_else(|_| Rational::zero(), |pos| self.terms[pos].1.clone())
    }

    /// Returns true if the polynomial mentions `vid` as a variable.
    #[must_use]
    pub fn contains(&self, vid: VarId) -> bool {
        self.terms.binary_search_by_key(&vid, |(v, _)| *v).is_ok()
    }

    /// The constant term.
    #[must_use]
    pub fn constant_term(&self) -> &Rational {
        &self.constant
    }

    /// Returns true if the constant term is the only term.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the value of a constant polynomial.
    #[must_use]
    pub fn constant_value(&self) -> Option<&Rational> {
        self.is_constant().then_some(&self.constant)
    }

    /// Returns the variable if the polynomial is exactly `1·x`.
    #[must_use]
    pub fn is_variable(&self) -> Option<VarId> {
        match self.terms.as_slice() {
            [(vid, c)] if c.is_one() && self.constant.is_zero() => Some(*vid),
            _ => None,
        }
    }

    /// False once a destructive operation on this polynomial has failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Number of terms, the constant term included.
    #[must_use]
    pub fn terms_count(&self) -> usize {
        self.terms.len() + 1
    }

    /// Number of variable terms.
    #[must_use]
    pub fn num_variables(&self) -> usize {
        self.terms.len()
    }

    /// Variable terms in ascending id order.
    #[must_use]
    pub fn terms(&self) -> &[(VarId, Rational)] {
        &self.terms
    }

    /// Variables in ascending id order.
    pub fn variables(&self) -> impl Iterator<Item = VarId> + '_ {
        self.terms.iter().map(|(vid, _)| *vid)
    }

    /// All terms in ascending id order, starting with the constant term.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, &Rational)> + '_ {
        std::iter::once((CONSTANT_TERM, &self.constant))
            .chain(self.terms.iter().map(|(vid, c)| (*vid, c)))
    }

    /// Merges two sorted term lists, negating `other` when `subtract` is set.
    fn combine(&self, other: &Self, subtract: bool) -> Self {
        let signed = |c: &Rational| if subtract { -c } else { c.clone() };
        let (a, b) = (&self.terms, &other.terms);
        let mut terms = Terms::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);

        loop {
            match (a.get(i), b.get(j)) {
                (Some((va, ca)), Some((vb, cb))) => match va.cmp(vb) {
                    Ordering::Less => {
                        terms.push((*va, ca.clone()));
                        i += 1;
                    }
                    Ordering::Greater => {
                        terms.push((*vb, signed(cb)));
                        j += 1;
                    }
                    Ordering::Equal => {
                        let c = ca + &signed(cb);
                        if !c.is_zero() {
                            terms.push((*va, c));
                        }
                        i += 1;
                        j += 1;
                    }
                },
                (Some((va, ca)), None) => {
                    terms.push((*va, ca.clone()));
                    i += 1;
                }
                (None, Some((vb, cb))) => {
                    terms.push((*vb, signed(cb)));
                    j += 1;
                }
                (None, None) => break,
            }
        }

        Self {
            constant: &self.constant + &signed(&other.constant),
            terms,
            valid: self.valid && other.valid,
        }
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        self.combine(other, false)
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.combine(other, true)
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            constant: -&self.constant,
            terms: self.terms.iter().map(|(vid, c)| (*vid, -c)).collect(),
            valid: self.valid,
        }
    }

    /// Multiplies every coefficient by `k`.
    #[must_use]
    pub fn scale(&self, k: &Rational) -> Self {
        let mut poly = self.clone();
        poly.scale_in_place(k);
        poly
    }

    /// Multiplies every coefficient by `k`, in place.
    pub fn scale_in_place(&mut self, k: &Rational) {
        if k.is_zero() {
            self.constant = Rational::zero();
            self.terms.clear();
            return;
        }
        self.constant = std::mem::take(&mut self.constant) * k;
        for (_, c) in &mut self.terms {
            *c = std::mem::take(c) * k;
        }
    }

    /// Divides every coefficient by `k`.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivByZero`] if `k` is zero.
    pub fn divide(&self, k: &Rational) -> Result<Self, ArithmeticError> {
        let mut poly = self.clone();
        poly.divide_in_place(k)?;
        Ok(poly)
    }

    /// Divides every coefficient by `k`, in place.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivByZero`] if `k` is zero. The polynomial
    /// is then left unchanged but flagged invalid.
    pub fn divide_in_place(&mut self, k: &Rational) -> Result<(), ArithmeticError> {
        if k.is_zero() {
            self.valid = false;
            return Err(ArithmeticError::DivByZero);
        }
        self.scale_in_place(&k.recip());
        Ok(())
    }

    /// Replaces the term `c·x` by `c·p`.
    ///
    /// Returns an unchanged copy if `vid` does not occur.
    ///
    /// # Panics
    ///
    /// Panics if `p` itself mentions `vid`.
    #[must_use]
    pub fn substitute(&self, vid: VarId, p: &Self) -> Self {
        let mut poly = self.clone();
        poly.substitute_in_place(vid, p);
        poly
    }

    /// In-place form of [`LinearPoly::substitute`].
    ///
    /// # Panics
    ///
    /// Panics if `p` itself mentions `vid`.
    pub fn substitute_in_place(&mut self, vid: VarId, p: &Self) {
        assert!(!p.contains(vid), "cyclic substitution of x.{vid}");
        let c = self.coeff(vid);
        if c.is_zero() {
            return;
        }
        self.set_term(vid, Rational::zero());
        *self += &p.scale(&c);
    }

    /// Finds the variable term of greatest magnitude, skipping variables for
    /// which `excluded` answers true.
    ///
    /// Ties go to the smallest id. Returns `(CONSTANT_TERM, 0)` if no
    /// candidate is left.
    #[must_use]
    pub fn max_abs_coeff<F>(&self, excluded: F) -> (VarId, Rational)
    where
        F: Fn(VarId) -> bool,
    {
        let mut best: Option<(VarId, &Rational, Rational)> = None;
        for (vid, c) in &self.terms {
            if excluded(*vid) {
                continue;
            }
            let magnitude = c.abs();
            if best.as_ref().is_none_or(|(_, _, max)| magnitude > *max) {
                best = Some((*vid, c, magnitude));
            }
        }
        best.map_or((CONSTANT_TERM, Rational::zero()), |(vid, c, _)| (vid, c.clone()))
    }

    /// Replaces every coefficient with `|c| < eps` by zero and drops the
    /// resulting zero terms.
    pub fn zap(&mut self, eps: &Rational) {
        self.constant = std::mem::take(&mut self.constant).zap(eps);
        self.terms.retain(|(_, c)| !c.is_near_zero(eps));
    }

    /// Consuming form of [`LinearPoly::zap`].
    #[must_use]
    pub fn zapped(mut self, eps: &Rational) -> Self {
        self.zap(eps);
        self
    }

    /// Evaluates the polynomial at an assignment of values to variables.
    #[must_use]
    pub fn evaluate<F>(&self, value_of: F) -> Rational
    where
        F: Fn(VarId) -> Rational,
    {
        self.terms
            .iter()
            .fold(self.constant.clone(), |acc, (vid, c)| acc + c * &value_of(*vid))
    }

    /// Renders the polynomial with the given variable names.
    ///
    /// Terms appear in ascending id order. The constant is omitted when it is
    /// zero and a variable term is present; unit coefficients are omitted:
    /// `100 - 2a + b`.
    #[must_use]
    pub fn render<F>(&self, name_of: F) -> String
    where
        F: Fn(VarId) -> String,
    {
        let mut out = String::new();
        if !self.constant.is_zero() || self.terms.is_empty() {
            out.push_str(&self.constant.to_text());
        }
        for (vid, c) in &self.terms {
            if out.is_empty() {
                if c.is_negative() {
                    out.push('-');
                }
            } else if c.is_negative() {
                out.push_str(" - ");
            } else {
                out.push_str(" + ");
            }
            let magnitude = c.abs();
            if !magnitude.is_one() {
                out.push_str(&magnitude.to_text());
            }
            out.push_str(&name_of(*vid));
        }
        out
    }
}

impl AddAssign<&LinearPoly> for LinearPoly {
    fn add_assign(&mut self, rhs: &LinearPoly) {
        *self = self.combine(rhs, false);
    }
}

impl SubAssign<&LinearPoly> for LinearPoly {
    fn sub_assign(&mut self, rhs: &LinearPoly) {
        *self = self.combine(rhs, true);
    }
}

impl Neg for LinearPoly {
    type Output = Self;

    fn neg(self) -> Self::Output {
        LinearPoly::neg(&self)
    }
}

impl From<Rational> for LinearPoly {
    fn from(c: Rational) -> Self {
        Self::constant(c)
    }
}

/// Renders with generic variable names `x.<id>`.
impl fmt::Display for LinearPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|vid| format!("x.{vid}")))
    }
}
