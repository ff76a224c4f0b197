//! Primality and Factors
//!
//! All operations accept magnitudes up to [`MAX_PRIME`] (2³¹ - 1). The sign
//! of the argument is ignored for primality; factor lists of a negative
//! number carry a negated copy of every factor.

use crate::sieve::OddSieve;
use entities_numeric::{keys, BigInteger, NumericError, Result};
use tracing::{debug, trace};

/// Largest magnitude accepted
pub const MAX_PRIME: u64 = i32::MAX as u64;

/// |n| as a u64, provided it is within [`MAX_PRIME`].
fn checked_magnitude(n: &BigInteger) -> Result<u64> {
    n.abs()
        .to_i64()
        .map(i64::unsigned_abs)
        .filter(|magnitude| *magnitude <= MAX_PRIME)
        .ok_or_else(|| NumericError::invalid(keys::PRIME_TOO_BIG, n.to_string()))
}

/// A bound at or above √n, so that every prime factor up to √n is sieved.
fn sieve_limit(n: u64) -> u64 {
    (n as f64).sqrt().ceil() as u64 + 1
}

/// Test `n` for primality.
///
/// 0 is not prime. 1 and 2 (and -1, -2) are treated as prime. Other even
/// numbers are composite; odd numbers are tried against the primes up to
/// √|n|, stopping at the first divisor.
///
/// # Errors
/// `InvalidArgument` (`PRIME_TOO_BIG`) when |n| exceeds [`MAX_PRIME`].
///
/// ```rust
/// use entities_numeric::BigInteger;
/// use usecases_primality::is_prime;
///
/// assert!(is_prime(&BigInteger::from_i64(97)).unwrap());
/// assert!(!is_prime(&BigInteger::from_i64(91)).unwrap());
/// ```
pub fn is_prime(n: &BigInteger) -> Result<bool> {
    let magnitude = checked_magnitude(n)?;
    if magnitude == 0 {
        return Ok(false);
    }
    if magnitude <= 2 {
        return Ok(true);
    }
    if magnitude % 2 == 0 {
        return Ok(false);
    }
    let limit = sieve_limit(magnitude);
    debug!(n = magnitude, limit, "primality sieve");
    let mut sieve = OddSieve::new(limit);
    for prime in sieve.primes() {
        if magnitude == prime {
            return Ok(true);
        }
        if magnitude % prime == 0 {
            trace!(n = magnitude, factor = prime, "composite");
            return Ok(false);
        }
    }
    Ok(true)
}

/// Push `factor`, and its negation when `negative`.
fn push_signed(factors: &mut Vec<i64>, factor: u64, negative: bool) {
    // factor <= MAX_PRIME, so it fits
    let factor = factor as i64;
    factors.push(factor);
    if negative {
        factors.push(-factor);
    }
}

/// Every divisor of `n`, in increasing order. Zero has none; a negative `n`
/// also lists the negated divisors.
///
/// # Errors
/// `InvalidArgument` (`PRIME_TOO_BIG`) when |n| exceeds [`MAX_PRIME`].
pub fn factors(n: &BigInteger) -> Result<Vec<i64>> {
    let magnitude = checked_magnitude(n)?;
    let negative = n.is_negative();
    let mut found = Vec::new();
    let mut divisor = 1u64;
    while divisor * divisor <= magnitude {
        if magnitude % divisor == 0 {
            push_signed(&mut found, divisor, negative);
            let pair = magnitude / divisor;
            if pair != divisor {
                push_signed(&mut found, pair, negative);
            }
        }
        divisor += 1;
    }
    found.sort_unstable();
    Ok(found)
}

/// Divide every power of `prime` out of `value`, recording each.
fn divide_out(value: u64, prime: u64, negative: bool, factors: &mut Vec<i64>) -> u64 {
    let mut value = value;
    while value % prime == 0 {
        push_signed(factors, prime, negative);
        value /= prime;
    }
    value
}

/// The prime factorization of `n` with multiplicity, in increasing order.
///
/// 1 factors as `[1]`; zero has no factors. A negative `n` also lists the
/// negated factors.
///
/// # Errors
/// `InvalidArgument` (`PRIME_TOO_BIG`) when |n| exceeds [`MAX_PRIME`].
pub fn prime_factors(n: &BigInteger) -> Result<Vec<i64>> {
    let magnitude = checked_magnitude(n)?;
    let negative = n.is_negative();
    let mut found = Vec::new();
    if magnitude == 0 {
        return Ok(found);
    }
    if magnitude == 1 {
        push_signed(&mut found, 1, negative);
        return Ok(found);
    }

    let mut remaining = divide_out(magnitude, 2, negative, &mut found);
    let mut sieve = OddSieve::new(sieve_limit(remaining));
    for prime in sieve.primes() {
        if prime * prime > remaining {
            break;
        }
        remaining = divide_out(remaining, prime, negative, &mut found);
    }
    // At most one prime factor exceeds the square root
    if remaining != 1 {
        push_signed(&mut found, remaining, negative);
    }
    found.sort_unstable();
    Ok(found)
}
