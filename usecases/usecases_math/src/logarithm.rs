//! Natural and base-2 logarithms.

use crate::cache::NumericCache;
use crate::constants::e_for;
use crate::rounding::finish;
use entities_numeric::{keys, BigDecimal, MathContext, NumericError, Result};
use tracing::{debug, trace};

fn non_positive(x: &BigDecimal) -> NumericError {
    NumericError::invalid(keys::OUT_OF_RANGE, format!("logarithm of {}", x))
}

/// ln(x), rounded to `ctx`.
///
/// `x` is divided or multiplied by e until it lies in (1/e, e), counting the
/// steps, and the rest comes from the series
/// ln(x) = 2 (z + z³/3 + z⁵/5 + ...) with z = (x - 1) / (x + 1).
///
/// # Errors
/// `InvalidArgument` when `x` is zero or negative.
pub fn ln(cache: &NumericCache, x: &BigDecimal, ctx: &MathContext) -> Result<BigDecimal> {
    if x.signum() <= 0 {
        return Err(non_positive(x));
    }
    if *x == BigDecimal::one() {
        return Ok(BigDecimal::zero());
    }
    let work = ctx.widened(10);
    let one = BigDecimal::one();
    let e = e_for(cache, &work)?;
    let inverse_e = one.divide(&e, &work)?;

    let mut value = x.clone();
    let mut whole = 0i64;
    while value >= e {
        value = value.divide(&e, &work)?;
        whole += 1;
    }
    while value <= inverse_e {
        value = value.times(&e).round(&work);
        whole -= 1;
    }
    debug!(whole, reduced = %value, "ln range reduced");

    let z = value.minus(&one).divide(&value.plus(&one), &work)?;
    let z_squared = z.times(&z).round(&work);
    let mut power = z.clone();
    let mut series = z;
    let limit = u64::from(ctx.precision()) * 15 * 2;
    let mut k = 1u64;
    while k < limit {
        k += 2;
        power = power.times(&z_squared).round(&work);
        let next = series
            .plus(&power.divide(&BigDecimal::from_i64(k as i64), &work)?)
            .round(&work);
        trace!(step = k, result = %next, "ln series");
        if next == series {
            break;
        }
        series = next;
    }
    let result = series.times(&BigDecimal::from_i64(2)).plus(&BigDecimal::from_i64(whole));
    Ok(finish(&result, ctx))
}

/// log2(x), rounded to `ctx`.
///
/// After scaling `x` into [1, 2) by exact halving or doubling, each
/// fractional bit comes from squaring: the bit is set when the square
/// reaches 2.
///
/// # Errors
/// `InvalidArgument` when `x` is zero or negative.
pub fn log2(x: &BigDecimal, ctx: &MathContext) -> Result<BigDecimal> {
    if x.signum() <= 0 {
        return Err(non_positive(x));
    }
    let one = BigDecimal::one();
    let two = BigDecimal::from_i64(2);
    let half = BigDecimal::from_i64(5).move_point_left(1);

    let mut value = x.clone();
    let mut whole = 0i64;
    while value >= two {
        value = value.times(&half);
        whole += 1;
    }
    while value < one {
        value = value.times(&two);
        whole -= 1;
    }
    debug!(whole, reduced = %value, "log2 range reduced");

    let work = ctx.widened(2);
    let loops = (u64::from(ctx.precision()) + 1) * 17 / 5;
    let mut result = BigDecimal::from_i64(whole);
    let mut bit = half.clone();
    for step in 0..loops {
        value = value.times(&value).round(&work);
        if value >= two {
            value = value.times(&half);
            result = result.plus(&bit);
        }
        trace!(step, result = %result, "log2 bit");
        bit = bit.times(&half);
    }
    Ok(finish(&result, ctx))
}
