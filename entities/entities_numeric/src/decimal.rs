//! Arbitrary Precision Decimals
//!
//! A [`BigDecimal`] is an unscaled [`malachite::Integer`] together with a
//! decimal scale, so that the represented value is `unscaled × 10^-scale`.
//! Addition, subtraction and multiplication are exact. Division and rounding
//! are bounded by a [`MathContext`].
//!
//! Equality and ordering are numeric: `1.0 == 1.00`.
//!
//! ```rust
//! use entities_numeric::{BigDecimal, MathContext};
//!
//! let one: BigDecimal = "1".parse().unwrap();
//! let three: BigDecimal = "3".parse().unwrap();
//! let third = one.divide(&three, &MathContext::DECIMAL32).unwrap();
//! assert_eq!(third.to_string(), "0.3333333");
//! ```

use crate::big::BigInteger;
use crate::context::{MathContext, RoundingMode};
use crate::error::{keys, NumericError, Result};
use malachite::base::num::arithmetic::traits::{Abs, Pow};
use malachite::base::num::basic::traits::{One, Zero};
use malachite::Integer;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// 10^exponent as an Integer
fn ten_pow(exponent: u64) -> Integer {
    Integer::from(10).pow(exponent)
}

/// Number of decimal digits in |value|; zero has one digit.
fn digit_count(value: &Integer) -> u64 {
    let text = value.to_string();
    text.trim_start_matches('-').len() as u64
}

/// Whether a discarded fraction moves the kept quotient away from zero.
///
/// `half` compares twice the discarded fraction with one unit of the last
/// kept digit.
fn rounds_away(
    mode: RoundingMode,
    negative: bool,
    quotient_odd: bool,
    inexact: bool,
    half: Ordering,
) -> bool {
    if !inexact {
        return false;
    }
    match mode {
        RoundingMode::Up => true,
        RoundingMode::Down => false,
        RoundingMode::Ceiling => !negative,
        RoundingMode::Floor => negative,
        RoundingMode::HalfUp => half != Ordering::Less,
        RoundingMode::HalfDown => half == Ordering::Greater,
        RoundingMode::HalfEven => {
            half == Ordering::Greater || (half == Ordering::Equal && quotient_odd)
        }
    }
}

/// Drop the last `count` digits of `value`, rounding the rest by `mode`.
///
/// `sticky` marks a nonzero remainder below the dropped digits (from a
/// preceding division), which breaks exact ties.
fn drop_digits(
    value: &Integer,
    count: u64,
    mode: RoundingMode,
    sticky: bool,
    negative: bool,
) -> Integer {
    if count == 0 && !sticky {
        return value.clone();
    }
    let divisor = ten_pow(count);
    let quotient = value / &divisor;
    let remainder = value % &divisor;
    let inexact = remainder != Integer::ZERO || sticky;
    let twice = remainder.abs() * Integer::from(2);
    let mut half = twice.cmp(&divisor);
    if half == Ordering::Equal && sticky {
        half = Ordering::Greater;
    }
    let odd = (&quotient % Integer::from(2)) != Integer::ZERO;
    if rounds_away(mode, negative, odd, inexact, half) {
        if negative {
            quotient - Integer::ONE
        } else {
            quotient + Integer::ONE
        }
    } else {
        quotient
    }
}

/// Arbitrary precision signed decimal number.
#[derive(Clone, Debug)]
pub struct BigDecimal {
    unscaled: Integer,
    scale: i64,
}

impl BigDecimal {
    /// Build a decimal from its unscaled value and scale.
    pub fn from_parts(unscaled: Integer, scale: i64) -> Self {
        Self { unscaled, scale }
    }

    /// Zero with scale 0
    pub fn zero() -> Self {
        Self::from_parts(Integer::ZERO, 0)
    }

    /// One with scale 0
    pub fn one() -> Self {
        Self::from_parts(Integer::ONE, 0)
    }

    /// Create a decimal from i64 (scale 0)
    pub fn from_i64(value: i64) -> Self {
        Self::from_parts(Integer::from(value), 0)
    }

    /// The exact value 10^exponent
    pub fn power_of_ten(exponent: i64) -> Self {
        Self::from_parts(Integer::ONE, -exponent)
    }

    /// Shortest text that round-trips `value`, as a decimal.
    ///
    /// # Errors
    /// `InvalidArgument` for NaN and infinities.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(NumericError::invalid(keys::BAD_NUMBER, value.to_string()));
        }
        format!("{:e}", value).parse()
    }

    /// The unscaled integer value
    pub fn unscaled(&self) -> &Integer {
        &self.unscaled
    }

    /// Number of digits to the right of the decimal point (may be negative)
    pub fn scale(&self) -> i64 {
        self.scale
    }

    /// Number of significant digits of the unscaled value
    pub fn precision(&self) -> u64 {
        digit_count(&self.unscaled)
    }

    /// Check if the value is zero
    pub fn is_zero(&self) -> bool {
        self.unscaled == Integer::ZERO
    }

    /// Check if the value is below zero
    pub fn is_negative(&self) -> bool {
        self.unscaled < Integer::ZERO
    }

    /// -1, 0 or 1 depending on the sign
    pub fn signum(&self) -> i32 {
        match self.unscaled.cmp(&Integer::ZERO) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    /// Absolute value: |x|
    pub fn abs(&self) -> Self {
        Self::from_parts(self.unscaled.clone().abs(), self.scale)
    }

    /// Negation: -x
    pub fn neg(&self) -> Self {
        Self::from_parts(-&self.unscaled, self.scale)
    }

    /// Both unscaled values brought to the larger of the two scales.
    fn aligned(&self, other: &Self) -> (Integer, Integer, i64) {
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => (self.unscaled.clone(), other.unscaled.clone(), self.scale),
            Ordering::Less => {
                let shift = (other.scale - self.scale) as u64;
                (&self.unscaled * ten_pow(shift), other.unscaled.clone(), other.scale)
            }
            Ordering::Greater => {
                let shift = (self.scale - other.scale) as u64;
                (self.unscaled.clone(), &other.unscaled * ten_pow(shift), self.scale)
            }
        }
    }

    /// Exact sum: x + y
    pub fn plus(&self, other: &Self) -> Self {
        let (a, b, scale) = self.aligned(other);
        Self::from_parts(a + b, scale)
    }

    /// Exact difference: x - y
    pub fn minus(&self, other: &Self) -> Self {
        let (a, b, scale) = self.aligned(other);
        Self::from_parts(a - b, scale)
    }

    /// Exact product: x * y
    pub fn times(&self, other: &Self) -> Self {
        Self::from_parts(&self.unscaled * &other.unscaled, self.scale + other.scale)
    }

    /// Exact integer power: x^exponent
    pub fn pow(&self, exponent: u32) -> Self {
        Self::from_parts(
            self.unscaled.clone().pow(exponent as u64),
            self.scale * exponent as i64,
        )
    }

    /// Quotient rounded to `ctx`.
    ///
    /// An exact quotient keeps the fewest trailing zeros that still reach the
    /// scale `self.scale - divisor.scale`.
    ///
    /// # Errors
    /// `InvalidArgument` when `divisor` is zero.
    pub fn divide(&self, divisor: &Self, ctx: &MathContext) -> Result<Self> {
        if divisor.is_zero() {
            return Err(NumericError::invalid(
                keys::DIVIDE_BY_ZERO,
                format!("{} / {}", self, divisor),
            ));
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let preferred = self.scale - divisor.scale;
        let precision = ctx.precision() as u64;
        // At least precision + 2 quotient digits, so one guard digit survives.
        let shift = precision as i64 + 2 - self.precision() as i64 + divisor.precision() as i64;
        let (numerator, denominator) = if shift >= 0 {
            (&self.unscaled * ten_pow(shift as u64), divisor.unscaled.clone())
        } else {
            (self.unscaled.clone(), &divisor.unscaled * ten_pow((-shift) as u64))
        };
        let quotient = &numerator / &denominator;
        let remainder = &numerator % &denominator;
        let sticky = remainder != Integer::ZERO;
        let negative = self.signum() * divisor.signum() < 0;

        let drop = digit_count(&quotient).saturating_sub(precision);
        let exact = !sticky && (&quotient % ten_pow(drop)) == Integer::ZERO;
        let rounded = drop_digits(&quotient, drop, ctx.rounding(), sticky, negative);
        let result = Self::from_parts(rounded, preferred + shift - drop as i64).trimmed_to(precision);
        if exact {
            Ok(result.strip_to_scale(preferred))
        } else {
            Ok(result)
        }
    }

    /// Truncated integral quotient: trunc(x / y)
    ///
    /// # Errors
    /// `InvalidArgument` when `divisor` is zero.
    pub fn divide_to_integral(&self, divisor: &Self) -> Result<BigInteger> {
        if divisor.is_zero() {
            return Err(NumericError::invalid(
                keys::DIVIDE_BY_ZERO,
                format!("{} / {}", self, divisor),
            ));
        }
        let (a, b, _) = self.aligned(divisor);
        Ok(BigInteger::from_integer(a / b))
    }

    /// Remainder of the truncated integral quotient, exact: x - trunc(x/y)*y.
    /// The sign follows `self`.
    ///
    /// # Errors
    /// `InvalidArgument` when `divisor` is zero.
    pub fn remainder(&self, divisor: &Self) -> Result<Self> {
        if divisor.is_zero() {
            return Err(NumericError::invalid(
                keys::DIVIDE_BY_ZERO,
                format!("{} % {}", self, divisor),
            ));
        }
        let (a, b, scale) = self.aligned(divisor);
        Ok(Self::from_parts(a % b, scale))
    }

    /// Round to the precision and rounding mode of `ctx`.
    pub fn round(&self, ctx: &MathContext) -> Self {
        let precision = ctx.precision() as u64;
        let digits = self.precision();
        if digits <= precision {
            return self.clone();
        }
        let drop = digits - precision;
        let unscaled = drop_digits(&self.unscaled, drop, ctx.rounding(), false, self.is_negative());
        Self::from_parts(unscaled, self.scale - drop as i64).trimmed_to(precision)
    }

    /// A carry out of rounding (999 -> 1000) leaves one digit too many,
    /// which is always a trailing zero.
    fn trimmed_to(self, precision: u64) -> Self {
        if digit_count(&self.unscaled) > precision {
            Self::from_parts(self.unscaled / Integer::from(10), self.scale - 1)
        } else {
            self
        }
    }

    /// Change the scale, rounding by `mode` when digits are discarded.
    pub fn set_scale(&self, scale: i64, mode: RoundingMode) -> Self {
        match scale.cmp(&self.scale) {
            Ordering::Equal => self.clone(),
            Ordering::Greater => Self::from_parts(
                &self.unscaled * ten_pow((scale - self.scale) as u64),
                scale,
            ),
            Ordering::Less => {
                let drop = (self.scale - scale) as u64;
                let unscaled = drop_digits(&self.unscaled, drop, mode, false, self.is_negative());
                Self::from_parts(unscaled, scale)
            }
        }
    }

    /// Multiply by 10^n by adjusting the scale only.
    pub fn scale_by_power_of_ten(&self, n: i64) -> Self {
        Self::from_parts(self.unscaled.clone(), self.scale - n)
    }

    /// Move the decimal point `n` places to the left; the result never has a
    /// negative scale.
    pub fn move_point_left(&self, n: i64) -> Self {
        let moved = Self::from_parts(self.unscaled.clone(), self.scale + n);
        if moved.scale < 0 {
            moved.set_scale(0, RoundingMode::Down)
        } else {
            moved
        }
    }

    /// Move the decimal point `n` places to the right; the result never has
    /// a negative scale.
    pub fn move_point_right(&self, n: i64) -> Self {
        self.move_point_left(-n)
    }

    /// Remove trailing zeros from the unscaled value. Zero becomes `0`.
    pub fn strip_trailing_zeros(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        self.strip_to_scale(i64::MIN)
    }

    /// Remove trailing zeros while the scale stays above `preferred`.
    fn strip_to_scale(&self, preferred: i64) -> Self {
        let ten = Integer::from(10);
        let mut unscaled = self.unscaled.clone();
        let mut scale = self.scale;
        while scale > preferred && unscaled != Integer::ZERO && (&unscaled % &ten) == Integer::ZERO {
            unscaled /= &ten;
            scale -= 1;
        }
        Self::from_parts(unscaled, scale)
    }

    /// Check if the value has no fractional part
    pub fn is_whole(&self) -> bool {
        self.scale <= 0 || (&self.unscaled % ten_pow(self.scale as u64)) == Integer::ZERO
    }

    /// Integer part, truncated towards zero
    pub fn to_big_integer(&self) -> BigInteger {
        if self.scale <= 0 {
            BigInteger::from_integer(&self.unscaled * ten_pow((-self.scale) as u64))
        } else {
            BigInteger::from_integer(&self.unscaled / ten_pow(self.scale as u64))
        }
    }

    /// Largest integer not above the value
    pub fn floor(&self) -> BigInteger {
        let truncated = self.to_big_integer();
        if self.is_negative() && !self.is_whole() {
            truncated.minus(&BigInteger::one())
        } else {
            truncated
        }
    }

    /// Smallest integer not below the value
    pub fn ceil(&self) -> BigInteger {
        let truncated = self.to_big_integer();
        if !self.is_negative() && !self.is_whole() {
            truncated.plus(&BigInteger::one())
        } else {
            truncated
        }
    }

    /// Convert to i64
    ///
    /// Returns None when the value has a fractional part or is out of range
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_whole() {
            return None;
        }
        self.to_big_integer().to_i64()
    }

    /// Nearest f64; magnitudes beyond the f64 range become infinite.
    pub fn to_f64(&self) -> f64 {
        format!("{}e{}", self.unscaled, -self.scale)
            .parse()
            .unwrap_or(f64::NAN)
    }

    /// Text without an exponent, e.g. `-0.00120` or `1500`.
    pub fn to_plain_string(&self) -> String {
        if self.scale <= 0 {
            let whole = &self.unscaled * ten_pow((-self.scale) as u64);
            return whole.to_string();
        }
        let scale = self.scale as usize;
        let text = self.unscaled.to_string();
        let (sign, digits) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text.as_str()),
        };
        let mut padded = String::with_capacity(scale + 2);
        if digits.len() <= scale {
            padded.push_str(&"0".repeat(scale + 1 - digits.len()));
        }
        padded.push_str(digits);
        let split = padded.len() - scale;
        format!("{}{}.{}", sign, &padded[..split], &padded[split..])
    }
}

impl FromStr for BigDecimal {
    type Err = NumericError;

    /// Accepts `[+-]digits[.digits][(e|E)[+-]digits]`; either side of the
    /// point may be empty but not both.
    fn from_str(s: &str) -> Result<Self> {
        let bad = || NumericError::invalid(keys::BAD_NUMBER, s);
        let (mantissa, exponent) = match s.find(['e', 'E']) {
            Some(at) => {
                let exp_text = &s[at + 1..];
                let exp_digits = exp_text
                    .strip_prefix(['+', '-'])
                    .unwrap_or(exp_text);
                if exp_digits.is_empty() || !exp_digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(bad());
                }
                let exponent: i64 = exp_text
                    .strip_prefix('+')
                    .unwrap_or(exp_text)
                    .parse()
                    .map_err(|_| bad())?;
                (&s[..at], exponent)
            }
            None => (s, 0),
        };

        let (negative, body) = match mantissa.as_bytes().first() {
            Some(b'-') => (true, &mantissa[1..]),
            Some(b'+') => (false, &mantissa[1..]),
            _ => (false, mantissa),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(bad());
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }

        let digits = format!("{}{}", int_part, frac_part);
        let magnitude = Integer::from_str(&digits).map_err(|_| bad())?;
        let unscaled = if negative { -magnitude } else { magnitude };
        let scale = (frac_part.len() as i64)
            .checked_sub(exponent)
            .ok_or_else(bad)?;
        Ok(Self::from_parts(unscaled, scale))
    }
}

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}

impl PartialEq for BigDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BigDecimal {}

impl PartialOrd for BigDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_sign = self.signum().cmp(&other.signum());
        if by_sign != Ordering::Equal || self.is_zero() {
            return by_sign;
        }
        let (a, b, _) = self.aligned(other);
        a.cmp(&b)
    }
}

impl From<i64> for BigDecimal {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<&BigInteger> for BigDecimal {
    fn from(value: &BigInteger) -> Self {
        Self::from_parts(value.as_integer().clone(), 0)
    }
}

impl From<BigInteger> for BigDecimal {
    fn from(value: BigInteger) -> Self {
        Self::from_parts(value.into_integer(), 0)
    }
}
