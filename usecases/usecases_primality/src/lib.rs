//! Use Cases Layer: Primality
//!
//! Primality testing and factoring of integers up to 2³¹ - 1.
//!
//! ## Overview
//!
//! Candidate divisors come from an odd-only Sieve of Eratosthenes built up
//! to just past √|n|. The sieve is grown prime by prime, so a composite
//! number is usually rejected long before the whole range has been sieved.
//!
//! By long-standing convention of the calculator these functions serve,
//! `is_prime(1)` is `true`.
//!
//! ## Modules
//!
//! - **[`sieve`](sieve/index.html)**: The odd-only bitset sieve
//! - **[`primes`](primes/index.html)**: `is_prime`, `factors` and `prime_factors`
//!
//! ## See Also
//!
//! - [`usecases_math`](../usecases_math/index.html): Transcendental functions

pub mod primes;
pub mod sieve;

pub use primes::{factors, is_prime, prime_factors, MAX_PRIME};
pub use sieve::OddSieve;
