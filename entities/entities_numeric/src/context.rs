//! Precision Contexts
//!
//! A [`MathContext`] bounds the number of significant digits of a result and
//! names the [`RoundingMode`] used to get there. Contexts are plain `Copy`
//! values owned by the caller and never mutated by the library.

use crate::error::{keys, NumericError, Result};
use std::fmt;
use std::str::FromStr;

/// Rounding policy applied when digits are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    /// Away from zero
    Up,
    /// Towards zero (truncation)
    Down,
    /// Towards positive infinity
    Ceiling,
    /// Towards negative infinity
    Floor,
    /// Nearest neighbour, ties away from zero
    #[default]
    HalfUp,
    /// Nearest neighbour, ties towards zero
    HalfDown,
    /// Nearest neighbour, ties to the even neighbour
    HalfEven,
}

impl FromStr for RoundingMode {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "up" => Ok(RoundingMode::Up),
            "down" => Ok(RoundingMode::Down),
            "ceiling" => Ok(RoundingMode::Ceiling),
            "floor" => Ok(RoundingMode::Floor),
            "halfup" => Ok(RoundingMode::HalfUp),
            "halfdown" => Ok(RoundingMode::HalfDown),
            "halfeven" => Ok(RoundingMode::HalfEven),
            _ => Err(NumericError::invalid(keys::BAD_ROUNDING, s)),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundingMode::Up => "UP",
            RoundingMode::Down => "DOWN",
            RoundingMode::Ceiling => "CEILING",
            RoundingMode::Floor => "FLOOR",
            RoundingMode::HalfUp => "HALF_UP",
            RoundingMode::HalfDown => "HALF_DOWN",
            RoundingMode::HalfEven => "HALF_EVEN",
        };
        f.write_str(name)
    }
}

/// Digit count plus rounding policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MathContext {
    precision: u32,
    rounding: RoundingMode,
}

impl MathContext {
    /// Largest precision accepted by [`MathContext::new`].
    pub const MAX_PRECISION: u32 = 1_000_000;

    /// IEEE 754 decimal32 equivalent (7 digits, half-even)
    pub const DECIMAL32: MathContext = MathContext {
        precision: 7,
        rounding: RoundingMode::HalfEven,
    };

    /// IEEE 754 decimal64 equivalent (16 digits, half-even)
    pub const DECIMAL64: MathContext = MathContext {
        precision: 16,
        rounding: RoundingMode::HalfEven,
    };

    /// IEEE 754 decimal128 equivalent (34 digits, half-even)
    pub const DECIMAL128: MathContext = MathContext {
        precision: 34,
        rounding: RoundingMode::HalfEven,
    };

    /// Create a validated context.
    ///
    /// # Errors
    /// `InvalidArgument` when `precision` is zero or above [`Self::MAX_PRECISION`].
    pub fn new(precision: u32, rounding: RoundingMode) -> Result<Self> {
        if precision == 0 || precision > Self::MAX_PRECISION {
            return Err(NumericError::invalid(
                keys::BAD_PRECISION,
                format!("precision {} is outside 1..={}", precision, Self::MAX_PRECISION),
            ));
        }
        Ok(Self { precision, rounding })
    }

    /// Create a validated context using [`RoundingMode::HalfUp`].
    pub fn with_precision(precision: u32) -> Result<Self> {
        Self::new(precision, RoundingMode::HalfUp)
    }

    /// Working context for intermediate results; the precision is clamped
    /// into the supported range instead of being rejected.
    pub fn clamped(precision: u64, rounding: RoundingMode) -> Self {
        let precision = precision.clamp(1, Self::MAX_PRECISION as u64) as u32;
        Self { precision, rounding }
    }

    /// A context with `extra` more digits and the same rounding.
    pub fn widened(&self, extra: u32) -> Self {
        Self::clamped(self.precision as u64 + extra as u64, self.rounding)
    }

    /// Number of significant digits.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Rounding policy.
    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }
}

impl Default for MathContext {
    fn default() -> Self {
        MathContext::DECIMAL128
    }
}

impl fmt::Display for MathContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "precision={} roundingMode={}", self.precision, self.rounding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_precision() {
        assert!(MathContext::new(0, RoundingMode::HalfUp).is_err());
        assert!(MathContext::new(MathContext::MAX_PRECISION + 1, RoundingMode::HalfUp).is_err());
        assert!(MathContext::new(1, RoundingMode::Down).is_ok());
    }

    #[test]
    fn test_rounding_mode_parse() {
        assert_eq!("half_even".parse::<RoundingMode>().unwrap(), RoundingMode::HalfEven);
        assert_eq!("HALF-UP".parse::<RoundingMode>().unwrap(), RoundingMode::HalfUp);
        assert_eq!("Ceiling".parse::<RoundingMode>().unwrap(), RoundingMode::Ceiling);
        assert!("sideways".parse::<RoundingMode>().is_err());
    }

    #[test]
    fn test_clamped_and_widened() {
        let ctx = MathContext::clamped(0, RoundingMode::Down);
        assert_eq!(ctx.precision(), 1);
        let wide = MathContext::DECIMAL64.widened(4);
        assert_eq!(wide.precision(), 20);
        assert_eq!(wide.rounding(), RoundingMode::HalfEven);
    }

    #[test]
    fn test_display() {
        assert_eq!(MathContext::DECIMAL32.to_string(), "precision=7 roundingMode=HALF_EVEN");
    }
}
