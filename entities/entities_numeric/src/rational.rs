//! Rational Number Operations Module
//!
//! Exact fractions used wherever a computation must not accumulate rounding
//! error before its final step: Bernoulli numbers, the π and e seed
//! approximations and the tangent series coefficients.
//!
//! # Implementation Details
//!
//! This module uses the `malachite` crate's `Rational` type. Values are kept
//! in reduced form, so two equal fractions always compare and hash equal.
//!
//! # Examples
//!
//! ```rust
//! use entities_numeric::{BigRational, MathContext};
//!
//! let third = BigRational::from_fraction(1, 3).unwrap();
//! let sum = third.plus(&third).plus(&third); // Exactly 1, no rounding error
//! assert_eq!(sum.to_i64(), Some(1));
//!
//! let approx = third.to_decimal(&MathContext::DECIMAL32).unwrap();
//! assert_eq!(approx.to_string(), "0.3333333");
//! ```

use crate::big::BigInteger;
use crate::context::MathContext;
use crate::decimal::BigDecimal;
use crate::error::Result;
use malachite::base::num::arithmetic::traits::{Abs, Pow};
use malachite::base::num::basic::traits::Zero;
use malachite::base::num::conversion::traits::IsInteger;
use malachite::{Integer, Rational};
use std::num::NonZeroU64;

/// Big rational number representation using malachite's Rational.
///
/// ```rust
/// use entities_numeric::BigRational;
///
/// let r = BigRational::from_fraction(2, 6).unwrap();
/// assert_eq!(r.to_string(), "1/3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BigRational {
    value: Rational,
}

impl BigRational {
    /// Create a new rational number from a 64-bit signed integer.
    pub fn from_i64(value: i64) -> Self {
        Self {
            value: Rational::from(value),
        }
    }

    /// Create a rational number from a numerator and denominator.
    ///
    /// Returns `None` if `denominator` is zero.
    pub fn from_fraction(numerator: i64, denominator: i64) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        Some(Self {
            value: Rational::from(numerator) / Rational::from(denominator),
        })
    }

    /// The fraction 1/denominator.
    pub fn unit_fraction(denominator: NonZeroU64) -> Self {
        Self {
            value: Rational::from_unsigneds(1u64, denominator.get()),
        }
    }

    /// The exact value of a decimal.
    pub fn from_decimal(value: &BigDecimal) -> Self {
        let unscaled = Rational::from(value.unscaled().clone());
        let scale = value.scale();
        let power = Rational::from(Integer::from(10).pow(scale.unsigned_abs()));
        let value = if scale >= 0 {
            unscaled / power
        } else {
            unscaled * power
        };
        Self { value }
    }

    /// Add two rational numbers.
    pub fn plus(&self, other: &Self) -> Self {
        Self {
            value: &self.value + &other.value,
        }
    }

    /// Subtract two rational numbers.
    pub fn minus(&self, other: &Self) -> Self {
        Self {
            value: &self.value - &other.value,
        }
    }

    /// Multiply two rational numbers.
    pub fn times(&self, other: &Self) -> Self {
        Self {
            value: &self.value * &other.value,
        }
    }

    /// Divide two rational numbers.
    ///
    /// Returns `None` on division by zero.
    pub fn div(&self, other: &Self) -> Option<Self> {
        if other.value == Rational::ZERO {
            return None;
        }
        Some(Self {
            value: &self.value / &other.value,
        })
    }

    /// Get the absolute value of a rational number.
    pub fn abs(&self) -> Self {
        Self {
            value: self.value.clone().abs(),
        }
    }

    /// Negate a rational number.
    pub fn neg(&self) -> Self {
        Self {
            value: -&self.value,
        }
    }

    /// Signed numerator of the reduced fraction.
    pub fn numerator(&self) -> BigInteger {
        let magnitude = Integer::from(self.value.numerator_ref().clone());
        if self.is_negative() {
            BigInteger::from_integer(-magnitude)
        } else {
            BigInteger::from_integer(magnitude)
        }
    }

    /// Positive denominator of the reduced fraction.
    pub fn denominator(&self) -> BigInteger {
        BigInteger::from_integer(Integer::from(self.value.denominator_ref().clone()))
    }

    /// The value as an i64, if it is an integer within range.
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        self.numerator().to_i64()
    }

    /// Decimal approximation rounded to `ctx`.
    pub fn to_decimal(&self, ctx: &MathContext) -> Result<BigDecimal> {
        let numerator = BigDecimal::from(self.numerator());
        let denominator = BigDecimal::from(self.denominator());
        numerator.divide(&denominator, ctx)
    }

    /// Check if the rational number is zero.
    pub fn is_zero(&self) -> bool {
        self.value == Rational::ZERO
    }

    /// Check if the rational number is negative.
    pub fn is_negative(&self) -> bool {
        self.value < Rational::ZERO
    }

    /// Check if the rational number represents an integer.
    pub fn is_integer(&self) -> bool {
        self.value.is_integer()
    }
}

impl From<&BigInteger> for BigRational {
    fn from(value: &BigInteger) -> Self {
        Self {
            value: Rational::from(value.as_integer().clone()),
        }
    }
}

impl std::fmt::Display for BigRational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
