//! Big Integer Operations
//!
//! Provides the arbitrary precision integer used by the scalar value set,
//! the BCD codec and the primality tester.
//!
//! This module uses the `malachite` crate for arbitrary-precision arithmetic.

use crate::error::{keys, NumericError, Result};
use malachite::base::num::arithmetic::traits::{Abs, Pow};
use malachite::Integer;
use std::fmt;
use std::str::FromStr;

/// Big integer representation using malachite's Integer
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigInteger {
    value: Integer,
}

impl BigInteger {
    /// Create a new big integer from i64
    pub fn from_i64(value: i64) -> Self {
        Self {
            value: Integer::from(value),
        }
    }

    /// Create a new big integer from u64
    pub fn from_u64(value: u64) -> Self {
        Self {
            value: Integer::from(value),
        }
    }

    /// Zero
    pub fn zero() -> Self {
        Self::from_i64(0)
    }

    /// One
    pub fn one() -> Self {
        Self::from_i64(1)
    }

    /// Convert to i64
    ///
    /// Returns None if the value is out of range
    pub fn to_i64(&self) -> Option<i64> {
        i64::try_from(&self.value).ok()
    }

    /// Check if the number is zero
    pub fn is_zero(&self) -> bool {
        self.value == Integer::from(0)
    }

    /// Check if the number is below zero
    pub fn is_negative(&self) -> bool {
        self.value < Integer::from(0)
    }

    /// Check if the number is divisible by two
    pub fn is_even(&self) -> bool {
        (&self.value % Integer::from(2)) == Integer::from(0)
    }

    /// -1, 0 or 1 depending on the sign
    pub fn signum(&self) -> i32 {
        match self.value.cmp(&Integer::from(0)) {
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => 1,
        }
    }

    /// Absolute value: |x|
    pub fn abs(&self) -> Self {
        Self {
            value: self.value.clone().abs(),
        }
    }

    /// Negation: -x
    pub fn neg(&self) -> Self {
        Self {
            value: -&self.value,
        }
    }

    /// Add two big integers: x + y
    pub fn plus(&self, other: &Self) -> Self {
        Self {
            value: &self.value + &other.value,
        }
    }

    /// Subtract two big integers: x - y
    pub fn minus(&self, other: &Self) -> Self {
        Self {
            value: &self.value - &other.value,
        }
    }

    /// Multiply two big integers: x * y
    pub fn times(&self, other: &Self) -> Self {
        Self {
            value: &self.value * &other.value,
        }
    }

    /// Divide two big integers, truncating: x / y
    ///
    /// Returns None if dividing by zero
    pub fn div(&self, other: &Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        Some(Self {
            value: &self.value / &other.value,
        })
    }

    /// Remainder of division: x % y (sign follows x)
    ///
    /// Returns None if dividing by zero
    pub fn rem(&self, other: &Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        Some(Self {
            value: &self.value % &other.value,
        })
    }

    /// Exact power: x^exponent
    pub fn pow(&self, exponent: u64) -> Self {
        Self {
            value: (&self.value).pow(exponent),
        }
    }

    /// The value 2^bits, built by setting a single bit
    pub fn power_of_two(bits: u64) -> Self {
        Self {
            value: Integer::from(1) << bits,
        }
    }

    /// Get the internal Integer value (for advanced use)
    pub fn as_integer(&self) -> &Integer {
        &self.value
    }

    /// Create from Integer (for advanced use)
    pub fn from_integer(value: Integer) -> Self {
        Self { value }
    }

    /// Consume and return the internal Integer
    pub fn into_integer(self) -> Integer {
        self.value
    }
}

impl FromStr for BigInteger {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.strip_prefix('+').unwrap_or(s);
        let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NumericError::invalid(keys::BAD_NUMBER, s));
        }
        Integer::from_str(trimmed)
            .map(Self::from_integer)
            .map_err(|_| NumericError::invalid(keys::BAD_NUMBER, s))
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<i64> for BigInteger {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<u64> for BigInteger {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<i32> for BigInteger {
    fn from(value: i32) -> Self {
        Self::from_i64(value as i64)
    }
}

impl From<Integer> for BigInteger {
    fn from(value: Integer) -> Self {
        Self::from_integer(value)
    }
}
