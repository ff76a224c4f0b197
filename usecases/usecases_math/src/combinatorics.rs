//! Factorial, Fibonacci and Bernoulli Numbers
//!
//! Integer-valued sequences. Factorial and Fibonacci are computed exactly
//! with iterative loops; Bernoulli numbers are computed as exact fractions
//! and cached in the [`NumericCache`].

use crate::cache::NumericCache;
use entities_numeric::{keys, BigDecimal, BigInteger, BigRational, MathContext, NumericError, Result};
use std::fmt;
use std::num::NonZeroU64;
use tracing::{debug, trace};

/// The argument as an i64, rejecting fractions and huge values.
fn whole_argument(n: &BigDecimal) -> Result<i64> {
    if !n.is_whole() {
        return Err(NumericError::invalid(keys::WHOLE_INTEGER, n.to_string()));
    }
    n.to_i64()
        .ok_or_else(|| NumericError::invalid(keys::OUT_OF_RANGE, n.to_string()))
}

/// 2 * 3 * ... * n
fn product_to(n: u64) -> BigInteger {
    (2..=n).fold(BigInteger::one(), |product, i| product.times(&BigInteger::from_u64(i)))
}

/// n! for whole `n`.
///
/// Non-negative results are exact integers and are not rounded. A negative
/// `n` gives the "Roman" factorial 1 / (|n| - 1)!, rounded to `ctx` and
/// negated when |n| - 1 is odd.
///
/// # Errors
/// - `InvalidArgument` (`WHOLE_INTEGER`) when `n` has a fractional part
/// - `InvalidArgument` (`OUT_OF_RANGE`) when `n` does not fit in an i64
pub fn factorial(n: &BigDecimal, ctx: &MathContext) -> Result<BigDecimal> {
    let n = whole_argument(n)?;
    if n == 0 || n == 1 {
        return Ok(BigDecimal::one());
    }
    if n > 0 {
        return Ok(BigDecimal::from(product_to(n as u64)));
    }
    let loops = n.unsigned_abs() - 1;
    let reciprocal = BigDecimal::one().divide(&BigDecimal::from(product_to(loops)), ctx)?;
    Ok(if loops % 2 == 1 { reciprocal.neg() } else { reciprocal })
}

/// The n-th Fibonacci number, with fib(0) = 0 and fib(1) = 1.
///
/// Negative `n` follows fib(-n) = (-1)^(n+1) fib(n).
///
/// # Errors
/// Same as [`factorial`].
pub fn fib(n: &BigDecimal) -> Result<BigInteger> {
    let n = whole_argument(n)?;
    let loops = n.unsigned_abs();
    let mut previous = BigInteger::zero();
    let mut current = BigInteger::one();
    let result = if loops == 0 {
        previous
    } else {
        for _ in 2..=loops {
            let next = previous.plus(&current);
            previous = current;
            current = next;
        }
        current
    };
    Ok(if n < 0 && loops % 2 == 0 { result.neg() } else { result })
}

/// Largest |n| accepted by [`bernoulli_rational`]. The recurrence keeps
/// |n| + 1 fractions and does O(n²) rational operations.
pub const MAX_BERNOULLI_INDEX: u64 = 50_000;

/// B(n) as an exact fraction, using the convention B(1) = +1/2.
///
/// Even values are computed with the Akiyama–Tanigawa recurrence. Every
/// even B(m) met on the way is cached, so later requests for smaller or
/// equal indices are lookups. A negative even `n` gives B(|n|).
///
/// # Errors
/// `InvalidArgument` (`OUT_OF_RANGE`) when |n| exceeds [`MAX_BERNOULLI_INDEX`].
pub fn bernoulli_rational(cache: &NumericCache, n: i64) -> Result<BigRational> {
    if n.unsigned_abs() > MAX_BERNOULLI_INDEX {
        return Err(NumericError::invalid(
            keys::OUT_OF_RANGE,
            format!("bernoulli index {} exceeds {}", n, MAX_BERNOULLI_INDEX),
        ));
    }
    if n == 0 {
        return Ok(BigRational::from_i64(1));
    }
    if n == 1 || n == -1 {
        let half = BigRational::unit_fraction(NonZeroU64::MIN.saturating_add(1));
        return Ok(BigRational::from_i64(n).times(&half));
    }
    if n % 2 != 0 {
        return Ok(BigRational::from_i64(0));
    }
    let num = n.unsigned_abs() as usize;
    if let Some(cached) = cache.bernoulli(num / 2) {
        return Ok(cached);
    }
    debug!(n = num, "computing bernoulli number");

    let mut arr: Vec<BigRational> = Vec::with_capacity(num + 1);
    for m in 0..=num {
        arr.push(BigRational::unit_fraction(NonZeroU64::MIN.saturating_add(m as u64)));
        for i in (1..=m).rev() {
            arr[i - 1] = arr[i - 1].minus(&arr[i]).times(&BigRational::from_i64(i as i64));
        }
        if m >= 2 && m % 2 == 0 {
            trace!(m, value = %arr[0], "bernoulli pass");
            cache.insert_bernoulli(m / 2, arr[0].clone());
        }
    }
    Ok(arr.swap_remove(0))
}

/// A Bernoulli number, either exact or rounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BernoulliNumber {
    Exact(BigRational),
    Rounded(BigDecimal),
}

impl fmt::Display for BernoulliNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BernoulliNumber::Exact(value) => write!(f, "{}", value),
            BernoulliNumber::Rounded(value) => write!(f, "{}", value),
        }
    }
}

/// B(n) as a fraction when `as_rational`, otherwise rounded to `ctx`.
///
/// # Errors
/// Same as [`bernoulli_rational`].
pub fn bernoulli(
    cache: &NumericCache,
    n: i64,
    ctx: &MathContext,
    as_rational: bool,
) -> Result<BernoulliNumber> {
    let value = bernoulli_rational(cache, n)?;
    if as_rational {
        Ok(BernoulliNumber::Exact(value))
    } else {
        Ok(BernoulliNumber::Rounded(value.to_decimal(ctx)?))
    }
}
