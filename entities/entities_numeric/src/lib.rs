//! Entities Layer: Numeric
//!
//! Provides the value types every other crate in the workspace is built on:
//! - Arbitrary precision integers ([`BigInteger`])
//! - Exact rationals ([`BigRational`])
//! - Arbitrary precision decimals ([`BigDecimal`])
//! - Precision contexts ([`MathContext`], [`RoundingMode`])
//! - The shared error type ([`NumericError`])

pub mod big;
pub mod context;
pub mod decimal;
pub mod error;
pub mod rational;

pub use big::BigInteger;
pub use context::{MathContext, RoundingMode};
pub use decimal::BigDecimal;
pub use error::{keys, NumericError, Result};
pub use rational::BigRational;
