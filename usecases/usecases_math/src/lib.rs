//! Use Cases Layer: Transcendental Functions
//!
//! Arbitrary precision versions of the functions a calculator needs beyond
//! the four arithmetic operations.
//!
//! ## Overview
//!
//! Every function takes a [`MathContext`](entities_numeric::MathContext)
//! and returns a [`BigDecimal`](entities_numeric::BigDecimal) rounded to it
//! with trailing zeros removed. Values that are costly to produce and never
//! change (digits of π and e, Bernoulli numbers) live in a
//! [`NumericCache`] owned by the caller and passed in by reference.
//!
//! ## Modules
//!
//! - **[`cache`](cache/index.html)**: The shared [`NumericCache`]
//! - **[`constants`](constants/index.html)**: π, e and the multiples of π
//! - **[`trig`](trig/index.html)**: sin, cos, tan and atan2
//! - **[`roots`](roots/index.html)**: Square and cube roots, the golden ratio
//! - **[`power`](power/index.html)**: Powers, exp and 10^x
//! - **[`logarithm`](logarithm/index.html)**: ln and log2
//! - **[`combinatorics`](combinatorics/index.html)**: Factorial, Fibonacci and Bernoulli numbers
//! - **[`rounding`](rounding/index.html)**: Rounding to decimal places, floor and ceil
//!
//! ## Examples
//!
//! ```rust
//! use entities_numeric::{BigDecimal, MathContext};
//! use usecases_math::{pi, sqrt, NumericCache};
//!
//! let cache = NumericCache::new();
//! assert_eq!(pi(&cache, 5).unwrap().to_string(), "3.14159");
//!
//! let ctx = MathContext::with_precision(10).unwrap();
//! let root = sqrt(&BigDecimal::from_i64(2), &ctx).unwrap();
//! assert_eq!(root.to_string(), "1.414213562");
//! ```
//!
//! ## See Also
//!
//! - [`entities_numeric`](../entities_numeric/index.html): The number types
//! - [`usecases_primality`](../usecases_primality/index.html): Primality testing

pub mod cache;
pub mod combinatorics;
pub mod constants;
pub mod logarithm;
pub mod power;
pub mod rounding;
pub mod roots;
pub mod trig;

pub use cache::NumericCache;
pub use combinatorics::{
    bernoulli, bernoulli_rational, factorial, fib, BernoulliNumber, MAX_BERNOULLI_INDEX,
};
pub use constants::{e, e_for, pi, pi_digits, pi_for, pi_multiples, PiMultiples};
pub use logarithm::{ln, log2};
pub use power::{exp, pow, pow_integer, ten_power};
pub use rounding::{ceil, floor, round_to_places};
pub use roots::{cbrt, phi, sqrt};
pub use trig::{atan2, cos, sin, tan};
