//! Mathematical Constants
//!
//! π and e to a requested number of fractional digits.
//!
//! Below [`APPROXIMATION_DIGITS`] a rational approximation is accurate
//! enough. Beyond that π comes from a spigot digit generator and e from the
//! series Σ 1/n!. The longest digit run produced so far is kept in the
//! [`NumericCache`] and shorter requests are served by truncating it.
//!
//! All values are truncated (rounded down), never rounded up, so that a
//! shorter value is always a prefix of a longer one.

use crate::cache::NumericCache;
use entities_numeric::{keys, BigDecimal, BigInteger, MathContext, NumericError, Result, RoundingMode};
use std::sync::Arc;
use tracing::debug;

/// Most fractional digits of π the spigot can produce (plus the leading 3).
pub const MAX_PI_DIGITS: u32 = 12_500;

/// Most fractional digits of e the series is asked for.
pub const MAX_E_DIGITS: u32 = 20_000;

/// Requests for fewer fractional digits use the rational approximations.
pub const APPROXIMATION_DIGITS: u32 = 25;

/// Convergent of π good to 24 fractional digits
const PI_APPROXIMATION: (i64, i64) = (8_958_937_768_937, 2_851_718_461_558);

/// Convergent of e good to 24 fractional digits
const E_APPROXIMATION: (i64, i64) = (22_526_049_624_551, 8_286_870_547_680);

const SPIGOT_SCALE: u64 = 10_000;
const SPIGOT_SEED: u64 = 2_000;
/// Each spigot pass consumes this many terms and yields four digits.
const SPIGOT_STRIDE: usize = 14;

/// π and the multiples the trigonometric functions reduce against, all at
/// the same number of fractional digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiMultiples {
    /// Fractional digits of [`PiMultiples::pi`]
    pub digits: u32,
    pub pi: BigDecimal,
    pub two_pi: BigDecimal,
    pub minus_two_pi: BigDecimal,
    pub half_pi: BigDecimal,
    pub minus_half_pi: BigDecimal,
    pub quarter_pi: BigDecimal,
    pub minus_quarter_pi: BigDecimal,
}

/// The first `count` decimal digits of π, starting with the 3.
///
/// # Errors
/// - `InvalidArgument` when `count` exceeds [`MAX_PI_DIGITS`]
/// - `InternalInconsistency` if the generator falls short
pub fn pi_digits(count: u32) -> Result<String> {
    if count > MAX_PI_DIGITS {
        return Err(NumericError::invalid(
            keys::TOO_MANY_DIGITS,
            format!("{} digits of pi requested, at most {} supported", count, MAX_PI_DIGITS),
        ));
    }
    let terms = (count as usize + 1) * SPIGOT_STRIDE / 4;
    let mut remainders = vec![SPIGOT_SEED; terms + 1];
    let mut chunks: Vec<u64> = Vec::with_capacity(terms / SPIGOT_STRIDE + 1);
    let mut carry = 0u64;

    let mut i = terms;
    while i > 0 {
        let mut sum = 0u64;
        for j in (1..=i).rev() {
            let denominator = (j * 2 - 1) as u64;
            sum = sum * j as u64 + SPIGOT_SCALE * remainders[j];
            remainders[j] = sum % denominator;
            sum /= denominator;
        }
        chunks.push(carry + sum / SPIGOT_SCALE);
        carry = sum % SPIGOT_SCALE;
        i = i.saturating_sub(SPIGOT_STRIDE);
    }

    // A chunk may reach 10000; push the overflow into the chunk before it.
    for k in (1..chunks.len()).rev() {
        if chunks[k] >= SPIGOT_SCALE {
            chunks[k] -= SPIGOT_SCALE;
            chunks[k - 1] += 1;
        }
    }

    let mut digits: String = chunks.iter().map(|chunk| format!("{:04}", chunk)).collect();
    if digits.len() < count as usize {
        return Err(NumericError::InternalInconsistency {
            detail: format!("generated {} digits of pi, expected {}", digits.len(), count),
        });
    }
    digits.truncate(count as usize);
    Ok(digits)
}

/// π truncated to `digits` fractional digits.
///
/// # Errors
/// `InvalidArgument` when `digits` is at or above [`MAX_PI_DIGITS`].
pub fn pi(cache: &NumericCache, digits: u32) -> Result<BigDecimal> {
    if digits < APPROXIMATION_DIGITS {
        return approximation(PI_APPROXIMATION, digits);
    }
    let needed = digits as usize + 1;
    let run = match cache.pi_digits().filter(|run| run.len() >= needed) {
        Some(run) => {
            debug!(digits, "pi digits from cache");
            run
        }
        None => {
            debug!(digits, "generating pi digits");
            let run: Arc<str> = Arc::from(pi_digits(digits.saturating_add(1))?);
            cache.offer_pi_digits(Arc::clone(&run));
            run
        }
    };
    from_digit_run(&run[..needed], digits)
}

/// π to the precision of `ctx` (one integer digit, the rest fractional).
pub fn pi_for(cache: &NumericCache, ctx: &MathContext) -> Result<BigDecimal> {
    pi(cache, ctx.precision().saturating_sub(1))
}

/// π and its multiples at `digits` fractional digits, derived once per
/// digit count.
pub fn pi_multiples(cache: &NumericCache, digits: u32) -> Result<Arc<PiMultiples>> {
    if let Some(multiples) = cache.pi_multiples(digits) {
        return Ok(multiples);
    }
    let pi = pi(cache, digits)?;
    let ctx = MathContext::clamped(u64::from(digits) + 1, RoundingMode::Down);
    let two_pi = pi.times(&BigDecimal::from_i64(2)).round(&ctx);
    let half_pi = pi.divide(&BigDecimal::from_i64(2), &ctx)?;
    let quarter_pi = pi.divide(&BigDecimal::from_i64(4), &ctx)?;
    let multiples = Arc::new(PiMultiples {
        digits,
        minus_two_pi: two_pi.neg(),
        minus_half_pi: half_pi.neg(),
        minus_quarter_pi: quarter_pi.neg(),
        pi,
        two_pi,
        half_pi,
        quarter_pi,
    });
    cache.store_pi_multiples(Arc::clone(&multiples));
    Ok(multiples)
}

/// e truncated to `digits` fractional digits.
///
/// # Errors
/// `InvalidArgument` when `digits` exceeds [`MAX_E_DIGITS`].
pub fn e(cache: &NumericCache, digits: u32) -> Result<BigDecimal> {
    if digits < APPROXIMATION_DIGITS {
        return approximation(E_APPROXIMATION, digits);
    }
    if digits > MAX_E_DIGITS {
        return Err(NumericError::invalid(
            keys::TOO_MANY_DIGITS,
            format!("{} digits of e requested, at most {} supported", digits, MAX_E_DIGITS),
        ));
    }
    let needed = digits as usize + 1;
    if let Some(run) = cache.e_digits().filter(|run| run.len() >= needed) {
        debug!(digits, "e digits from cache");
        return from_digit_run(&run[..needed], digits);
    }
    debug!(digits, "summing series for e");
    let value = e_series(digits)?;
    cache.offer_e_digits(Arc::from(value.unscaled().to_string()));
    Ok(value)
}

/// e to the precision of `ctx` (one integer digit, the rest fractional).
pub fn e_for(cache: &NumericCache, ctx: &MathContext) -> Result<BigDecimal> {
    e(cache, ctx.precision().saturating_sub(1))
}

/// Σ 1/n! with ten guard digits, truncated to `digits` fractional digits.
fn e_series(digits: u32) -> Result<BigDecimal> {
    let guarded = u64::from(digits) + 10;
    let work = MathContext::clamped(guarded + 2, RoundingMode::Down);
    let divisor_scale = guarded as i64;
    let mut sum = BigDecimal::from_i64(2);
    let mut term = BigDecimal::one();
    for n in 2..guarded {
        term = term
            .divide(&BigDecimal::from_i64(n as i64), &work)?
            .set_scale(divisor_scale, RoundingMode::Down);
        if term.is_zero() {
            break;
        }
        sum = sum.plus(&term);
    }
    Ok(sum.round(&MathContext::clamped(u64::from(digits) + 1, RoundingMode::Down)))
}

/// A rational convergent truncated to `digits` fractional digits.
fn approximation((numerator, denominator): (i64, i64), digits: u32) -> Result<BigDecimal> {
    let ctx = MathContext::clamped(u64::from(digits) + 1, RoundingMode::Down);
    BigDecimal::from_i64(numerator).divide(&BigDecimal::from_i64(denominator), &ctx)
}

/// "31415..." with one integer digit, as a decimal with `digits` fractional digits.
fn from_digit_run(run: &str, digits: u32) -> Result<BigDecimal> {
    let whole: BigInteger = run.parse()?;
    Ok(BigDecimal::from(whole).move_point_left(i64::from(digits)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PI_60: &str = "3.141592653589793238462643383279502884197169399375105820974944";
    const E_40: &str = "2.7182818284590452353602874713526624977572";

    #[test]
    fn test_spigot_digits() {
        assert_eq!(pi_digits(10).unwrap(), "3141592653");
        assert_eq!(pi_digits(0).unwrap(), "");
        let long = pi_digits(61).unwrap();
        assert_eq!(long, PI_60.replace('.', ""));
    }

    #[test]
    fn test_spigot_limit() {
        let err = pi_digits(MAX_PI_DIGITS + 1).unwrap_err();
        assert_eq!(err.key(), keys::TOO_MANY_DIGITS);
    }

    #[test]
    fn test_small_pi_uses_approximation() {
        let cache = NumericCache::new();
        assert_eq!(pi(&cache, 10).unwrap().to_string(), "3.1415926535");
        assert_eq!(pi(&cache, 0).unwrap().to_string(), "3");
        assert_eq!(pi(&cache, 24).unwrap().to_string(), &PI_60[..26]);
        assert!(cache.pi_digits().is_none());
    }

    #[test]
    fn test_pi_is_truncated_not_rounded() {
        let cache = NumericCache::new();
        // The 31st fractional digit is a 5.
        assert_eq!(pi(&cache, 30).unwrap().to_string(), &PI_60[..32]);
        assert_eq!(pi(&cache, 60).unwrap().to_string(), PI_60);
    }

    #[test]
    fn test_pi_digits_are_cached() {
        let cache = NumericCache::new();
        pi(&cache, 60).unwrap();
        assert_eq!(cache.pi_digits().map(|run| run.len()), Some(61));
        assert_eq!(pi(&cache, 40).unwrap().to_string(), &PI_60[..42]);
        assert_eq!(cache.pi_digits().map(|run| run.len()), Some(61));
    }

    #[test]
    fn test_pi_for_context() {
        let cache = NumericCache::new();
        let ctx = MathContext::with_precision(5).unwrap();
        assert_eq!(pi_for(&cache, &ctx).unwrap().to_string(), "3.1415");
    }

    #[test]
    fn test_pi_multiples() {
        let cache = NumericCache::new();
        let multiples = pi_multiples(&cache, 10).unwrap();
        assert_eq!(multiples.pi.to_string(), "3.1415926535");
        assert_eq!(multiples.two_pi.to_string(), "6.2831853070");
        assert_eq!(multiples.half_pi.to_string(), "1.5707963267");
        assert_eq!(multiples.minus_quarter_pi.to_string(), "-0.78539816337");
        assert!(Arc::ptr_eq(&multiples, &pi_multiples(&cache, 10).unwrap()));
        assert_eq!(pi_multiples(&cache, 12).unwrap().digits, 12);
    }

    #[test]
    fn test_e() {
        let cache = NumericCache::new();
        assert_eq!(e(&cache, 10).unwrap().to_string(), "2.7182818284");
        assert_eq!(e(&cache, 40).unwrap().to_string(), E_40);
        assert_eq!(e(&cache, 30).unwrap().to_string(), &E_40[..32]);
        assert_eq!(cache.e_digits().map(|run| run.len()), Some(41));
    }

    #[test]
    fn test_e_limit() {
        let cache = NumericCache::new();
        assert_eq!(e(&cache, MAX_E_DIGITS + 1).unwrap_err().key(), keys::TOO_MANY_DIGITS);
    }
}
