//! Trigonometric Functions
//!
//! sin and cos sum their Maclaurin series after reducing the argument into
//! [-2π, 2π]. tan reduces into [-π/2, π/2] and uses the Bernoulli power
//! series near zero, switching to sin/cos further out where that series
//! converges slowly. atan2 handles the exact angles directly and otherwise
//! sums the arctangent series after halving the argument.
//!
//! # Examples
//!
//! ```rust
//! use entities_numeric::{BigDecimal, MathContext};
//! use usecases_math::{cos, sin, NumericCache};
//!
//! let cache = NumericCache::new();
//! let ctx = MathContext::with_precision(20).unwrap();
//! let one = BigDecimal::one();
//! assert_eq!(sin(&cache, &one, &ctx).unwrap().to_string(), "0.84147098480789650665");
//! assert_eq!(cos(&cache, &BigDecimal::zero(), &ctx).unwrap().to_string(), "1");
//! ```

use crate::cache::NumericCache;
use crate::combinatorics::{bernoulli_rational, MAX_BERNOULLI_INDEX};
use crate::constants::pi_multiples;
use crate::rounding::finish;
use crate::roots::sqrt;
use entities_numeric::{BigDecimal, BigInteger, BigRational, MathContext, Result, RoundingMode};
use tracing::{debug, trace};

/// Decimal digits in the integer part of `x`, or zero when |x| < 1.
fn integer_digits(x: &BigDecimal) -> u32 {
    let order = x.precision() as i64 - x.scale();
    u32::try_from(order.max(0)).unwrap_or(u32::MAX)
}

/// Bring `x` into [-2π, 2π].
///
/// π is taken with enough extra digits that the integer multiples of 2π
/// removed from a large argument do not eat into the requested precision.
fn reduce_to_two_pi(cache: &NumericCache, x: &BigDecimal, ctx: &MathContext) -> Result<BigDecimal> {
    let digits = ctx.precision().saturating_add(integer_digits(x)).saturating_add(2);
    let multiples = pi_multiples(cache, digits)?;
    if *x < multiples.minus_two_pi || *x > multiples.two_pi {
        let reduced = x.remainder(&multiples.two_pi)?;
        debug!(original = %x, reduced = %reduced, "range reduced");
        Ok(reduced)
    } else {
        Ok(x.clone())
    }
}

/// Σ (-1)^i x^(2i+offset) / (2i+offset)!, the sin (offset 1) or cos
/// (offset 0) series, summed at twice the requested precision.
///
/// At least 1.5 terms per requested digit are taken; after that the sum
/// stops once a term no longer changes it.
fn alternating_series(
    x: &BigDecimal,
    offset: u64,
    ctx: &MathContext,
    name: &'static str,
) -> Result<BigDecimal> {
    let precision = u64::from(ctx.precision());
    let work = MathContext::clamped(precision * 2, RoundingMode::HalfUp);
    let minimum = precision * 3 / 2;
    let limit = minimum * 4 + 20;
    let x_squared = x.times(x).round(&work);

    let start = if offset == 1 { x.clone() } else { BigDecimal::one() };
    let mut power = start.clone();
    let mut result = start;
    let mut factorial = BigInteger::one();
    let mut factor = offset;

    for i in 1..limit {
        power = power.times(&x_squared).round(&work);
        factor += 1;
        factorial = factorial.times(&BigInteger::from_u64(factor));
        factor += 1;
        factorial = factorial.times(&BigInteger::from_u64(factor));
        let term = power.divide(&BigDecimal::from(&factorial), &work)?;
        let next = if i % 2 == 1 {
            result.minus(&term)
        } else {
            result.plus(&term)
        }
        .round(&work);
        trace!(function = name, step = i, result = %next, "series");
        if i + 1 >= minimum && next == result {
            break;
        }
        result = next;
    }
    Ok(result)
}

/// sin(x) for `x` in radians, rounded to `ctx`.
pub fn sin(cache: &NumericCache, x: &BigDecimal, ctx: &MathContext) -> Result<BigDecimal> {
    if x.is_zero() {
        return Ok(BigDecimal::zero());
    }
    let reduced = reduce_to_two_pi(cache, x, ctx)?;
    let result = alternating_series(&reduced, 1, ctx, "sin")?;
    Ok(finish(&result, ctx))
}

/// cos(x) for `x` in radians, rounded to `ctx`.
pub fn cos(cache: &NumericCache, x: &BigDecimal, ctx: &MathContext) -> Result<BigDecimal> {
    if x.is_zero() {
        return Ok(BigDecimal::one());
    }
    let reduced = reduce_to_two_pi(cache, x, ctx)?;
    let result = alternating_series(&reduced, 0, ctx, "cos")?;
    Ok(finish(&result, ctx))
}

/// Above this many tenths of |x| tan is computed as sin / cos.
const TAN_SERIES_LIMIT: i64 = 12;

/// tan(x) for `x` in radians, rounded to `ctx`.
///
/// Odd multiples of π/2 have no tangent; at finite precision they give a
/// large value of either sign.
pub fn tan(cache: &NumericCache, x: &BigDecimal, ctx: &MathContext) -> Result<BigDecimal> {
    let work = ctx.widened(4);
    let digits = work.precision().saturating_add(integer_digits(x));
    let multiples = pi_multiples(cache, digits)?;

    let mut x = x.clone();
    if x < multiples.minus_half_pi || x > multiples.half_pi {
        x = x.remainder(&multiples.pi)?;
        if x > multiples.half_pi {
            x = x.minus(&multiples.pi);
        } else if x < multiples.minus_half_pi {
            x = x.plus(&multiples.pi);
        }
        debug!(reduced = %x, "tan range reduced");
    }
    if x.is_zero() {
        return Ok(BigDecimal::zero());
    }

    let magnitude = x.abs();
    let approx_range = magnitude
        .times(&BigDecimal::from_i64(10))
        .floor()
        .to_i64()
        .unwrap_or(i64::MAX)
        .saturating_add(1);
    let per_range = (i64::from(ctx.precision()) + 3) / 4;
    let loops = (approx_range + approx_range / 2) * per_range + 3;
    debug!(precision = ctx.precision(), approx_range, per_range, loops, "tan");

    // Term i needs B(2i), which is only available up to the Bernoulli bound.
    let max_terms = (MAX_BERNOULLI_INDEX / 2) as i64;
    let estimate = estimated_terms(&magnitude, ctx).min(loops);
    if approx_range > TAN_SERIES_LIMIT || estimate > max_terms {
        let quotient = sin(cache, &x, &work)?.divide(&cos(cache, &x, &work)?, &work)?;
        return Ok(finish(&quotient, ctx));
    }

    // One Bernoulli pass up front caches every coefficient the loop will ask for.
    bernoulli_rational(cache, estimate * 2)?;

    let x_squared = x.times(&x).round(&work);
    let mut result = x.clone();
    let mut x_power = x;
    let mut two_power = BigInteger::from_i64(4);
    let four = BigInteger::from_i64(4);
    let mut factorial = BigInteger::from_i64(2);
    let mut factor = 2u64;

    for i in 2..loops.min(max_terms + 1) {
        two_power = two_power.times(&four);
        x_power = x_power.times(&x_squared).round(&work);
        let numerator = two_power.times(&two_power.minus(&BigInteger::one()));
        factor += 1;
        factorial = factorial.times(&BigInteger::from_u64(factor));
        factor += 1;
        factorial = factorial.times(&BigInteger::from_u64(factor));

        // (-1)^(i-1) is cancelled by the alternating sign of B(2i)
        let bn = bernoulli_rational(cache, i * 2)?.abs();
        let coefficient = bn
            .times(&BigRational::from(&numerator))
            .to_decimal(&work)?
            .divide(&BigDecimal::from(&factorial), &work)?;
        let next = result.plus(&coefficient.times(&x_power)).round(&work);
        trace!(step = i, result = %next, "tan series");
        if next == result {
            break;
        }
        result = next;
    }
    Ok(finish(&result, ctx))
}

/// Terms of the tan series needed for `ctx` digits at |x| = `magnitude`,
/// from the ratio (2|x|/π)^2 between successive terms.
fn estimated_terms(magnitude: &BigDecimal, ctx: &MathContext) -> i64 {
    let ratio = std::f64::consts::FRAC_PI_2 / magnitude.to_f64();
    let digits = f64::from(ctx.precision()) + 2.0;
    let terms = digits * std::f64::consts::LN_10 / (2.0 * ratio.ln()) + 2.0;
    if terms.is_finite() && terms > 2.0 {
        terms.ceil() as i64
    } else {
        2
    }
}

/// The angle of the point (x, y) from the positive x axis, in (-π, π].
///
/// atan2(0, 0) is 0.
pub fn atan2(
    cache: &NumericCache,
    y: &BigDecimal,
    x: &BigDecimal,
    ctx: &MathContext,
) -> Result<BigDecimal> {
    let multiples = pi_multiples(cache, ctx.precision().saturating_add(2))?;
    let exact = if y.is_zero() {
        Some(if x.is_negative() { multiples.pi.clone() } else { BigDecimal::zero() })
    } else if x.is_zero() {
        Some(if y.is_negative() { multiples.minus_half_pi.clone() } else { multiples.half_pi.clone() })
    } else if y.abs() == x.abs() {
        let three = BigDecimal::from_i64(3);
        Some(match (y.is_negative(), x.is_negative()) {
            (false, false) => multiples.quarter_pi.clone(),
            (true, false) => multiples.minus_quarter_pi.clone(),
            (false, true) => multiples.quarter_pi.times(&three),
            (true, true) => multiples.minus_quarter_pi.times(&three),
        })
    } else {
        None
    };
    if let Some(angle) = exact {
        return Ok(finish(&angle, ctx));
    }

    let work = MathContext::clamped(u64::from(ctx.precision()) * 2, RoundingMode::HalfUp);
    let mut result = arctan(&y.divide(x, &work)?, &work)?;
    if x.is_negative() {
        result = if y.is_negative() {
            result.minus(&multiples.pi)
        } else {
            result.plus(&multiples.pi)
        };
    }
    Ok(finish(&result, ctx))
}

/// arctan(z) at `work` precision.
///
/// Each halving z / (1 + √(1 + z²)) halves the angle; once |z| is at most
/// 1/4 the series z - z³/3 + z⁵/5 - ... converges quickly.
fn arctan(z: &BigDecimal, work: &MathContext) -> Result<BigDecimal> {
    let quarter = BigDecimal::from_i64(25).move_point_left(2);
    let one = BigDecimal::one();
    let mut z = z.clone();
    let mut halvings = 0u64;
    while z.abs() > quarter {
        let root = sqrt(&one.plus(&z.times(&z)), work)?;
        z = z.divide(&one.plus(&root), work)?;
        halvings += 1;
    }
    debug!(halvings, reduced = %z, "arctan");

    let z_squared = z.times(&z).round(work);
    let mut power = z.clone();
    let mut result = z;
    let limit = u64::from(work.precision()) * 4 + 20;
    for k in 1..limit {
        power = power.times(&z_squared).round(work);
        let term = power.divide(&BigDecimal::from_i64((2 * k + 1) as i64), work)?;
        let next = if k % 2 == 1 { result.minus(&term) } else { result.plus(&term) }.round(work);
        trace!(step = k, result = %next, "arctan series");
        if next == result {
            break;
        }
        result = next;
    }
    Ok(result.times(&BigDecimal::from(BigInteger::power_of_two(halvings))))
}
