//! Rounding helpers shared by the math functions.

use entities_numeric::{BigDecimal, BigInteger, MathContext, RoundingMode};

/// Round a finished result to `ctx` and drop trailing zeros.
pub(crate) fn finish(result: &BigDecimal, ctx: &MathContext) -> BigDecimal {
    result.round(ctx).strip_trailing_zeros()
}

/// Round to `places` fractional digits, however many integer digits the
/// value has. Negative `places` rounds to tens, hundreds and so on, but at
/// least one significant digit is always kept.
///
/// ```rust
/// use entities_numeric::BigDecimal;
/// use usecases_math::round_to_places;
///
/// let value: BigDecimal = "1234.5678".parse().unwrap();
/// assert_eq!(round_to_places(&value, 2).to_string(), "1234.57");
/// assert_eq!(round_to_places(&value, -2).to_string(), "1200");
/// ```
pub fn round_to_places(value: &BigDecimal, places: i64) -> BigDecimal {
    let precision = value.precision() as i64;
    let scale = value.scale();
    let target = (precision - scale + places).max(1);
    if target > precision {
        value.set_scale(scale + (target - precision), RoundingMode::HalfUp)
    } else {
        value.round(&MathContext::clamped(target as u64, RoundingMode::HalfUp))
    }
}

/// Largest integer not above `value`
pub fn floor(value: &BigDecimal) -> BigInteger {
    value.floor()
}

/// Smallest integer not below `value`
pub fn ceil(value: &BigDecimal) -> BigInteger {
    value.ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(text: &str) -> BigDecimal {
        text.parse().unwrap()
    }

    #[test]
    fn test_round_to_places() {
        assert_eq!(round_to_places(&dec("3.14159"), 3).to_plain_string(), "3.142");
        assert_eq!(round_to_places(&dec("0.714285"), 1).to_plain_string(), "0.7");
        assert_eq!(round_to_places(&dec("2.5"), 3).to_plain_string(), "2.500");
        assert_eq!(round_to_places(&dec("-2.5"), 0).to_plain_string(), "-3");
        assert_eq!(round_to_places(&dec("1234.5678"), -2).to_plain_string(), "1200");
    }

    #[test]
    fn test_round_keeps_one_digit() {
        assert_eq!(round_to_places(&dec("0.714"), -2).to_plain_string(), "0.7");
    }

    #[test]
    fn test_finish_strips_zeros() {
        let ctx = MathContext::with_precision(4).unwrap();
        assert_eq!(finish(&dec("1.000049"), &ctx).to_string(), "1");
        assert_eq!(finish(&dec("2.71828"), &ctx).to_string(), "2.718");
    }

    #[test]
    fn test_floor_and_ceil() {
        assert_eq!(floor(&dec("-1.5")).to_i64(), Some(-2));
        assert_eq!(ceil(&dec("-1.5")).to_i64(), Some(-1));
        assert_eq!(floor(&dec("7")).to_i64(), Some(7));
        assert_eq!(ceil(&dec("7.01")).to_i64(), Some(8));
    }
}
