//! Arbitrary precision rational numbers.
//!
//! Every coefficient and constant handled by the solver is a [`Rational`].
//! Values stay exact through any number of substitutions; the only lossy
//! step is [`Rational::zap`], which deliberately flushes residues below a
//! threshold to zero.

use dashu::base::{Abs, Inverse, Signed as DashuSigned, UnsignedAbs};
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::{ArithmeticError, Integer};

/// Fractional digits shown for values without a terminating decimal expansion.
pub const TEXT_PLACES: u32 = 7;

/// An arbitrary precision rational number.
///
/// Rationals are always stored in lowest terms with a positive denominator.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rational(RBig);

impl Rational {
    /// Creates a new rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(numerator: Integer, denominator: Integer) -> Self {
        assert!(!denominator.is_zero(), "denominator cannot be zero");
        let (numerator, denominator) = if denominator.is_negative() {
            (-numerator, -denominator)
        } else {
            (numerator, denominator)
        };
        Self(RBig::from_parts(
            numerator.into_inner(),
            denominator.into_inner().unsigned_abs(),
        ))
    }

    /// Creates the rational `numerator / denominator`.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivByZero`] if the denominator is zero.
    pub fn from_ratio(numerator: i64, denominator: i64) -> Result<Self, ArithmeticError> {
        if denominator == 0 {
            return Err(ArithmeticError::DivByZero);
        }
        Ok(Self::new(Integer::new(numerator), Integer::new(denominator)))
    }

    /// Creates a rational from i64 numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Self {
        Self::new(Integer::new(numerator), Integer::new(denominator))
    }

    /// Creates a rational from an integer (denominator = 1).
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        Self(RBig::from(n.into_inner()))
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> Integer {
        Integer::from(self.0.numerator().clone())
    }

    /// Returns the (always positive) denominator.
    #[must_use]
    pub fn denominator(&self) -> Integer {
        Integer::from(dashu::integer::IBig::from(self.0.denominator().clone()))
    }

    /// Returns true if this rational is an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.denominator().is_one()
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the reciprocal (1/x).
    ///
    /// # Panics
    ///
    /// Panics if the rational is zero.
    #[must_use]
    pub fn recip(&self) -> Self {
        assert!(!self.is_zero(), "cannot take reciprocal of zero");
        Self(self.0.clone().inv())
    }

    /// Divides by `rhs`, refusing a zero divisor.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivByZero`] if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, ArithmeticError> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivByZero);
        }
        Ok(Self(&self.0 / &rhs.0))
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns true if `|self| < eps`.
    ///
    /// With `eps == 0` nothing is near zero, not even zero itself.
    #[must_use]
    pub fn is_near_zero(&self, eps: &Self) -> bool {
        self.abs() < *eps
    }

    /// Flushes values with `|self| < eps` to exact zero.
    #[must_use]
    pub fn zap(self, eps: &Self) -> Self {
        if self.is_near_zero(eps) {
            Self::zero()
        } else {
            self
        }
    }

    /// Approximates the value as an `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().value()
    }

    /// Renders the value in decimal notation.
    ///
    /// Terminating expansions are exact; all others are rounded half away
    /// from zero to [`TEXT_PLACES`] fractional digits. Trailing zeros are
    /// dropped.
    #[must_use]
    pub fn to_text(&self) -> String {
        if self.is_integer() {
            return self.numerator().to_string();
        }
        let den = self.denominator();
        let (rest, twos) = den.strip_factor(2);
        let (rest, fives) = rest.strip_factor(5);
        let places = if rest.is_one() {
            twos.max(fives)
        } else {
            TEXT_PLACES
        };
        decimal_string(&self.numerator(), &den, places)
    }

    /// Renders the value as a reduced fraction, e.g. `-2/3`.
    #[must_use]
    pub fn to_fraction_string(&self) -> String {
        if self.is_integer() {
            self.numerator().to_string()
        } else {
            format!("{}/{}", self.numerator(), self.denominator())
        }
    }
}

/// `num / den` rounded to `places` fractional digits. `den` must be positive.
fn decimal_string(num: &Integer, den: &Integer, places: u32) -> String {
    let scale = Integer::new(10).pow(places);
    let scaled = &num.abs() * &scale;
    let mut quotient = scaled.clone() / den;
    let remainder = scaled % den.clone();
    if remainder * Integer::new(2) >= *den {
        quotient = quotient + Integer::one();
    }

    let mut text = String::new();
    if num.is_negative() && !quotient.is_zero() {
        text.push('-');
    }
    text.push_str(&(quotient.clone() / &scale).to_string());

    let fraction = format!(
        "{:0>width$}",
        (quotient % scale).to_string(),
        width = places as usize
    );
    let fraction = fraction.trim_end_matches('0');
    if !fraction.is_empty() {
        text.push('.');
        text.push_str(fraction);
    }
    text
}

impl Zero for Rational {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({})", self.to_fraction_string())
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

// Arithmetic operations
impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add<&Rational> for Rational {
    type Output = Self;

    fn add(self, rhs: &Rational) -> Self::Output {
        Self(self.0 + &rhs.0)
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Self::Output {
        Rational(&self.0 + &rhs.0)
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub<&Rational> for Rational {
    type Output = Self;

    fn sub(self, rhs: &Rational) -> Self::Output {
        Self(self.0 - &rhs.0)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Self::Output {
        Rational(&self.0 - &rhs.0)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<&Rational> for Rational {
    type Output = Self;

    fn mul(self, rhs: &Rational) -> Self::Output {
        Self(self.0 * &rhs.0)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Self::Output {
        Rational(&self.0 * &rhs.0)
    }
}

/// Panics on a zero divisor; use [`Rational::checked_div`] where the divisor
/// comes from outside.
impl Div for Rational {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational(-&self.0)
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(Integer::new(n))
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from_integer(Integer::new(i64::from(n)))
    }
}
