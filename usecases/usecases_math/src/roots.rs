//! Square and cube roots by Newton–Raphson iteration.

use crate::rounding::finish;
use entities_numeric::{keys, BigDecimal, MathContext, NumericError, Result};
use tracing::{debug, trace};

/// Upper bound on Newton steps; a few are enough for hundreds of digits.
const MAX_STEPS: usize = 50;

/// 10^(order / divisor), where order approximates the decimal exponent of `x`.
fn trial_root(x: &BigDecimal, divisor: i64) -> BigDecimal {
    let order = x.precision() as i64 - x.scale();
    BigDecimal::one().move_point_right(order / divisor)
}

/// Square root of `x`, rounded to `ctx`.
///
/// # Errors
/// `InvalidArgument` (`SQRT_NEGATIVE`) when `x` is negative.
pub fn sqrt(x: &BigDecimal, ctx: &MathContext) -> Result<BigDecimal> {
    if x.is_negative() {
        return Err(NumericError::invalid(keys::SQRT_NEGATIVE, x.to_string()));
    }
    if x.is_zero() || *x == BigDecimal::one() {
        return Ok(x.clone());
    }
    let work = ctx.widened(2);
    let two = BigDecimal::from_i64(2);
    let mut result = trial_root(x, 2);
    debug!(trial = %result, "sqrt");
    for step in 0..MAX_STEPS {
        let next = result.plus(&x.divide(&result, &work)?).divide(&two, &work)?;
        trace!(step, result = %next, "sqrt");
        if next == result {
            break;
        }
        result = next;
    }
    Ok(finish(&result, ctx))
}

/// Cube root of `x`, rounded to `ctx`. Negative input gives a negative root.
pub fn cbrt(x: &BigDecimal, ctx: &MathContext) -> Result<BigDecimal> {
    if x.is_zero() {
        return Ok(BigDecimal::zero());
    }
    let magnitude = x.abs();
    let work = ctx.widened(2);
    let three = BigDecimal::from_i64(3);
    let mut result = trial_root(x, 3);
    debug!(trial = %result, "cbrt");
    for step in 0..MAX_STEPS {
        let square = result.times(&result);
        let cube = square.times(&result);
        let correction = magnitude.minus(&cube).divide(&square.times(&three), &work)?;
        let next = result.plus(&correction).round(&work);
        trace!(step, result = %next, "cbrt");
        if next == result {
            break;
        }
        result = next;
    }
    let result = if x.is_negative() { result.neg() } else { result };
    Ok(finish(&result, ctx))
}

/// The golden ratio (1 + √5) / 2, or its reciprocal (√5 - 1) / 2.
pub fn phi(ctx: &MathContext, reciprocal: bool) -> Result<BigDecimal> {
    let work = ctx.widened(2);
    let two = BigDecimal::from_i64(2);
    let term = sqrt(&BigDecimal::from_i64(5), &work)?.plus(&BigDecimal::one());
    let result = if reciprocal {
        two.divide(&term, &work)?
    } else {
        term.divide(&two, &work)?
    };
    Ok(finish(&result, ctx))
}
