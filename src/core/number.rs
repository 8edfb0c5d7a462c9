//! Numeric literals of the expression engine.
//!
//! Integer literals stay exact (`Rational64`) so that rule matching on
//! exponents and coefficients is reliable (`x^2`, `1/3`, `-1`). Anything that
//! involves a floating literal, or overflows `i64`, degrades to `f64`.

use num_rational::Rational64;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;

/// Largest integer exponent evaluated exactly by [`Number::pow`]
const MAX_EXACT_EXPONENT: i64 = 64;

/// An exact rational or a floating-point constant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Rational(Rational64),
    Float(f64),
}

impl Number {
    pub fn integer(n: i64) -> Self {
        Number::Rational(Rational64::from_integer(n))
    }

    /// Create `numer/denom` in lowest terms. A zero denominator yields NaN.
    pub fn rational(numer: i64, denom: i64) -> Self {
        if denom == 0 {
            return Number::Float(f64::NAN);
        }
        Number::Rational(Rational64::new(numer, denom))
    }

    pub fn float(value: f64) -> Self {
        Number::Float(value)
    }

    pub fn zero() -> Self {
        Number::integer(0)
    }

    pub fn one() -> Self {
        Number::integer(1)
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Number::Rational(r) => r.to_f64().unwrap_or(f64::NAN),
            Number::Float(f) => f,
        }
    }

    #[allow(clippy::float_cmp, reason = "floats fold only when exact")]
    pub fn is_zero(&self) -> bool {
        match self {
            Number::Rational(r) => r.is_zero(),
            Number::Float(f) => *f == 0.0,
        }
    }

    #[allow(clippy::float_cmp, reason = "floats fold only when exact")]
    pub fn is_one(&self) -> bool {
        match self {
            Number::Rational(r) => r.is_one(),
            Number::Float(f) => *f == 1.0,
        }
    }

    #[allow(clippy::float_cmp, reason = "floats fold only when exact")]
    pub fn is_neg_one(&self) -> bool {
        match self {
            Number::Rational(r) => *r == -Rational64::one(),
            Number::Float(f) => *f == -1.0,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Number::Rational(r) => r.is_negative(),
            Number::Float(f) => *f < 0.0,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Number::Rational(_))
    }

    /// The value as an `i64` when it is an exact integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Number::Rational(r) if r.is_integer() => Some(*r.numer()),
            _ => None,
        }
    }

    pub fn abs(self) -> Self {
        match self {
            Number::Rational(r) => Number::Rational(r.abs()),
            Number::Float(f) => Number::Float(f.abs()),
        }
    }

    pub fn add(self, other: Number) -> Number {
        match (self, other) {
            (Number::Rational(a), Number::Rational(b)) => a
                .checked_add(&b)
                .map_or_else(|| Number::Float(self.to_f64() + other.to_f64()), Number::Rational),
            _ => Number::Float(self.to_f64() + other.to_f64()),
        }
    }

    pub fn sub(self, other: Number) -> Number {
        self.add(other.neg())
    }

    pub fn mul(self, other: Number) -> Number {
        match (self, other) {
            (Number::Rational(a), Number::Rational(b)) => a
                .checked_mul(&b)
                .map_or_else(|| Number::Float(self.to_f64() * other.to_f64()), Number::Rational),
            _ => Number::Float(self.to_f64() * other.to_f64()),
        }
    }

    /// Division; `None` on an exact zero divisor
    pub fn div(self, other: Number) -> Option<Number> {
        match (self, other) {
            (_, Number::Rational(b)) if b.is_zero() => None,
            (Number::Rational(a), Number::Rational(b)) => Some(
                a.checked_div(&b).map_or_else(
                    || Number::Float(self.to_f64() / other.to_f64()),
                    Number::Rational,
                ),
            ),
            _ => Some(Number::Float(self.to_f64() / other.to_f64())),
        }
    }

    #[allow(clippy::should_implement_trait, reason = "Number is Copy; by-value neg reads better")]
    pub fn neg(self) -> Number {
        match self {
            Number::Rational(r) => Number::Rational(-r),
            Number::Float(f) => Number::Float(-f),
        }
    }

    /// Reciprocal; `None` for an exact zero
    pub fn recip(self) -> Option<Number> {
        Number::one().div(self)
    }

    /// Raise to a numeric power.
    ///
    /// Returns `None` when the result has no representation that keeps the
    /// expression exact (e.g. `2^(1/2)`), so the caller keeps a symbolic power.
    pub fn pow(self, exponent: Number) -> Option<Number> {
        match (self, exponent) {
            (Number::Rational(base), Number::Rational(exp)) => exact_pow(base, exp),
            _ => {
                let value = self.to_f64().powf(exponent.to_f64());
                value.is_finite().then_some(Number::Float(value))
            }
        }
    }

    /// Total order used for canonical sorting
    pub fn total_cmp(&self, other: &Number) -> Ordering {
        match (self, other) {
            (Number::Rational(a), Number::Rational(b)) => a.cmp(b),
            _ => self
                .to_f64()
                .total_cmp(&other.to_f64())
                .then_with(|| self.is_exact().cmp(&other.is_exact()).reverse()),
        }
    }
}

fn exact_pow(base: Rational64, exp: Rational64) -> Option<Number> {
    if exp.is_integer() {
        let n = *exp.numer();
        if n.abs() > MAX_EXACT_EXPONENT {
            let value = base.to_f64()?.powf(exp.to_f64()?);
            return value.is_finite().then_some(Number::Float(value));
        }
        if n < 0 && base.is_zero() {
            return None;
        }
        let b = if n < 0 { base.recip() } else { base };
        let mut acc = Rational64::one();
        for _ in 0..n.unsigned_abs() {
            match acc.checked_mul(&b) {
                Some(next) => acc = next,
                None => {
                    let value = b.to_f64()?.powf(n.unsigned_abs() as f64);
                    return value.is_finite().then_some(Number::Float(value));
                }
            }
        }
        return Some(Number::Rational(acc));
    }

    // Fractional exponent p/q: only evaluate when both parts are perfect q-th powers
    let q = u32::try_from(*exp.denom()).ok()?;
    if base.is_negative() {
        return None;
    }
    let numer_root = integer_root(*base.numer(), q)?;
    let denom_root = integer_root(*base.denom(), q)?;
    let root = Rational64::new(numer_root, denom_root);
    exact_pow(root, Rational64::from_integer(*exp.numer()))
}

/// Exact non-negative integer k-th root, if one exists
fn integer_root(n: i64, k: u32) -> Option<i64> {
    if n < 0 {
        return None;
    }
    let guess = (n as f64).powf(1.0 / f64::from(k)).round() as i64;
    (guess.saturating_sub(1)..=guess.saturating_add(1))
        .find(|&candidate| candidate >= 0 && candidate.checked_pow(k) == Some(n))
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::integer(n)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Rational(r) if r.is_integer() => write!(f, "{}", r.numer()),
            Number::Rational(r) => write!(f, "{}/{}", r.numer(), r.denom()),
            Number::Float(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    write!(f, "{}", if *n > 0.0 { "Infinity" } else { "-Infinity" })
                } else {
                    write!(f, "{n:?}")
                }
            }
        }
    }
}
