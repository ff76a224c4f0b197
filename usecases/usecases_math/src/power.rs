//! Powers and Exponentials
//!
//! Integer exponents are handled by square-and-multiply at a widened working
//! precision. A fractional exponent part falls back to `f64` and is combined
//! with the integer part by multiplication, so those results are only as
//! accurate as a double.

use crate::cache::NumericCache;
use crate::constants::e_for;
use crate::rounding::finish;
use entities_numeric::{keys, BigDecimal, BigInteger, MathContext, NumericError, Result};
use tracing::trace;

/// Largest integer part of an exponent.
pub const MAX_EXPONENT: u64 = 999_999_999;

fn exponent_out_of_range(exponent: impl std::fmt::Display) -> NumericError {
    NumericError::invalid(keys::OUT_OF_RANGE, format!("exponent {}", exponent))
}

/// Extra working digits so that square-and-multiply keeps `ctx` accurate.
fn guard_digits(exponent: u64) -> u32 {
    exponent.to_string().len() as u32 + 3
}

/// base^exponent by repeated squaring, each product rounded to `work`.
pub(crate) fn integer_power(base: &BigDecimal, exponent: u64, work: &MathContext) -> BigDecimal {
    let mut result = BigDecimal::one();
    let mut square = base.round(work);
    let mut remaining = exponent;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = result.times(&square).round(work);
        }
        remaining >>= 1;
        if remaining > 0 {
            square = square.times(&square).round(work);
        }
    }
    result
}

/// base^exponent, rounded to `ctx`.
///
/// A negative exponent gives the reciprocal of the positive power. Two
/// raised to a positive whole exponent is built exactly by setting one bit.
///
/// # Errors
/// - `InvalidArgument` for a NaN or infinite exponent, or one whose integer
///   part exceeds [`MAX_EXPONENT`]
/// - `InvalidArgument` for a fractional power of a negative base
/// - `InvalidArgument` for a negative power of zero
pub fn pow(base: &BigDecimal, exponent: f64, ctx: &MathContext) -> Result<BigDecimal> {
    if !exponent.is_finite() {
        return Err(exponent_out_of_range(exponent));
    }
    if exponent == 0.0 {
        return Ok(BigDecimal::one());
    }
    let reciprocal = exponent < 0.0;
    let magnitude = exponent.abs();
    let whole = magnitude.floor();
    let fraction = magnitude - whole;
    if whole > MAX_EXPONENT as f64 {
        return Err(exponent_out_of_range(exponent));
    }
    let whole = whole as u64;

    let mut result = if !reciprocal && fraction == 0.0 && *base == BigDecimal::from_i64(2) {
        BigDecimal::from(BigInteger::power_of_two(whole))
    } else {
        let work = ctx.widened(guard_digits(whole));
        let mut result = integer_power(base, whole, &work);
        if fraction != 0.0 {
            let partial = BigDecimal::from_f64(base.to_f64().powf(fraction))?;
            trace!(fraction, partial = %partial, "fractional power");
            result = result.times(&partial);
        }
        result
    };
    if reciprocal {
        result = BigDecimal::one().divide(&result, ctx)?;
    }
    Ok(finish(&result, ctx))
}

/// Exact base^exponent for integers.
pub fn pow_integer(base: &BigInteger, exponent: u64) -> BigInteger {
    if *base == BigInteger::from_i64(2) {
        BigInteger::power_of_two(exponent)
    } else {
        base.pow(exponent)
    }
}

/// 10^x, rounded to `ctx`.
///
/// # Errors
/// `InvalidArgument` when the integer part of `x` does not fit in an i64.
pub fn ten_power(x: &BigDecimal, ctx: &MathContext) -> Result<BigDecimal> {
    if x.is_zero() {
        return Ok(BigDecimal::one());
    }
    let whole = x.to_big_integer();
    let shift = whole.to_i64().ok_or_else(|| exponent_out_of_range(&whole))?;
    let fraction = x.minus(&BigDecimal::from(&whole));
    let scaled = if fraction.is_zero() {
        BigDecimal::power_of_ten(shift)
    } else {
        pow(&BigDecimal::from_i64(10), fraction.to_f64(), ctx)?.scale_by_power_of_ten(shift)
    };
    Ok(finish(&scaled, ctx))
}

/// e^x, rounded to `ctx`.
///
/// The integer part of `x` is a power of the cached e; the fractional part
/// is summed from the Maclaurin series until it stops changing.
///
/// # Errors
/// `InvalidArgument` when the integer part of |x| exceeds [`MAX_EXPONENT`]
/// or needs more digits of e than are available.
pub fn exp(cache: &NumericCache, x: &BigDecimal, ctx: &MathContext) -> Result<BigDecimal> {
    if x.is_zero() {
        return Ok(BigDecimal::one());
    }
    let magnitude = x.abs();
    let whole = magnitude
        .to_big_integer()
        .to_i64()
        .and_then(|w| u64::try_from(w).ok())
        .filter(|w| *w <= MAX_EXPONENT)
        .ok_or_else(|| exponent_out_of_range(x))?;
    let fraction = magnitude.minus(&BigDecimal::from_i64(whole as i64));
    let work = ctx.widened(10 + guard_digits(whole));

    let mut result = BigDecimal::one();
    if !fraction.is_zero() {
        result = result.plus(&fraction);
        let mut numerator = fraction.clone();
        let mut factorial = BigDecimal::one();
        let loops = u64::from(ctx.precision()) * 2;
        for i in 2..loops.max(3) {
            factorial = factorial.times(&BigDecimal::from_i64(i as i64));
            numerator = numerator.times(&fraction).round(&work);
            let term = numerator.divide(&factorial, &work)?;
            let next = result.plus(&term).round(&work);
            trace!(step = i, result = %next, "exp series");
            if next == result {
                break;
            }
            result = next;
        }
    }
    if whole > 0 {
        let e = e_for(cache, &work)?;
        result = integer_power(&e, whole, &work).times(&result).round(&work);
    }
    if x.is_negative() {
        result = BigDecimal::one().divide(&result, &work)?;
    }
    Ok(finish(&result, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(text: &str) -> BigDecimal {
        text.parse().unwrap()
    }

    fn ctx(precision: u32) -> MathContext {
        MathContext::with_precision(precision).unwrap()
    }

    #[test]
    fn test_integer_exponents() {
        assert_eq!(pow(&dec("3"), 5.0, &ctx(34)).unwrap().to_string(), "243");
        assert_eq!(pow(&dec("1.5"), 2.0, &ctx(34)).unwrap().to_string(), "2.25");
        assert_eq!(pow(&dec("-2"), 3.0, &ctx(34)).unwrap().to_string(), "-8");
        assert_eq!(pow(&dec("7"), 0.0, &ctx(34)).unwrap().to_string(), "1");
    }

    #[test]
    fn test_power_of_two_fast_path() {
        let big = pow(&dec("2"), 100.0, &ctx(40)).unwrap();
        assert_eq!(big.to_plain_string(), "1267650600228229401496703205376");
    }

    #[test]
    fn test_negative_exponent() {
        assert_eq!(pow(&dec("2"), -3.0, &ctx(34)).unwrap().to_string(), "0.125");
        assert_eq!(
            pow(&dec("3"), -1.0, &ctx(20)).unwrap().to_string(),
            "0.33333333333333333333"
        );
    }

    #[test]
    fn test_fractional_exponent_is_double_accurate() {
        let root = pow(&dec("2"), 0.5, &ctx(20)).unwrap();
        assert!((root.to_f64() - std::f64::consts::SQRT_2).abs() < 1e-15);
        let mixed = pow(&dec("1.5"), 2.5, &ctx(20)).unwrap();
        assert!((mixed.to_f64() - 2.7556759606310753605).abs() < 1e-14);
    }

    #[test]
    fn test_bad_exponents() {
        for exponent in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e12] {
            let err = pow(&dec("2"), exponent, &ctx(10)).unwrap_err();
            assert_eq!(err.key(), keys::OUT_OF_RANGE);
        }
        assert!(pow(&dec("-2"), 0.5, &ctx(10)).is_err());
        assert_eq!(pow(&dec("0"), -1.0, &ctx(10)).unwrap_err().key(), keys::DIVIDE_BY_ZERO);
    }

    #[test]
    fn test_large_exponent_stays_bounded() {
        let value = pow(&dec("1.0000001"), 10_000_000.0, &ctx(10)).unwrap();
        // (1 + 1e-7)^1e7 is just under e
        assert_eq!(value.to_string(), "2.718281693");
    }

    #[test]
    fn test_pow_integer() {
        assert_eq!(pow_integer(&BigInteger::from_i64(2), 64), BigInteger::power_of_two(64));
        assert_eq!(pow_integer(&BigInteger::from_i64(-5), 3).to_i64(), Some(-125));
    }

    #[test]
    fn test_ten_power() {
        assert_eq!(ten_power(&dec("3"), &ctx(10)).unwrap().to_plain_string(), "1000");
        assert_eq!(ten_power(&dec("-2"), &ctx(10)).unwrap().to_string(), "0.01");
        assert_eq!(ten_power(&dec("0"), &ctx(10)).unwrap().to_string(), "1");
        let root = ten_power(&dec("0.5"), &ctx(16)).unwrap();
        assert!((root.to_f64() - 3.162277660168379332).abs() < 1e-14);
        let shifted = ten_power(&dec("2.5"), &ctx(16)).unwrap();
        assert!((shifted.to_f64() - 316.2277660168379332).abs() < 1e-12);
    }

    #[test]
    fn test_exp() {
        let cache = NumericCache::new();
        assert_eq!(exp(&cache, &dec("0"), &ctx(20)).unwrap().to_string(), "1");
        assert_eq!(exp(&cache, &dec("1"), &ctx(20)).unwrap().to_string(), "2.7182818284590452354");
        assert_eq!(exp(&cache, &dec("0.5"), &ctx(20)).unwrap().to_string(), "1.6487212707001281468");
        assert_eq!(exp(&cache, &dec("-1"), &ctx(20)).unwrap().to_string(), "0.3678794411714423216");
        assert_eq!(exp(&cache, &dec("2.5"), &ctx(20)).unwrap().to_string(), "12.182493960703473438");
    }

    #[test]
    fn test_exp_out_of_range() {
        let cache = NumericCache::new();
        let err = exp(&cache, &dec("1e10"), &ctx(10)).unwrap_err();
        assert_eq!(err.key(), keys::OUT_OF_RANGE);
    }
}
