//! Integration tests for usecases_primality crate
//!
//! These tests compare the sieve-driven functions against plain trial
//! division and check that factorizations multiply back to the input.

use entities_numeric::{keys, BigInteger};
use proptest::prelude::*;
use usecases_primality::*;

fn trial_division(n: u64) -> bool {
    if n < 2 {
        return n == 1;
    }
    (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

#[test]
fn test_agrees_with_trial_division_below_ten_thousand() {
    for n in 0..10_000i64 {
        let expected = trial_division(n as u64);
        assert_eq!(is_prime(&BigInteger::from_i64(n)).unwrap(), expected, "{}", n);
        assert_eq!(is_prime(&BigInteger::from_i64(-n)).unwrap(), expected, "{}", -n);
    }
}

#[test]
fn test_known_large_values() {
    let cases = [
        (2_147_483_647i64, true),
        (2_147_483_629, true),
        (2_147_483_645, false),
        (1_000_000_007, true),
        (999_999_999, false),
        // 46_327 * 46_337
        (2_146_654_199, false),
    ];
    for (n, expected) in cases {
        assert_eq!(is_prime(&BigInteger::from_i64(n)).unwrap(), expected, "{}", n);
    }
}

#[test]
fn test_magnitude_bound_applies_everywhere() {
    let too_big = BigInteger::from_i64(i64::from(i32::MAX) + 1);
    assert_eq!(is_prime(&too_big).unwrap_err().key(), keys::PRIME_TOO_BIG);
    assert_eq!(factors(&too_big).unwrap_err().key(), keys::PRIME_TOO_BIG);
    assert_eq!(prime_factors(&too_big).unwrap_err().key(), keys::PRIME_TOO_BIG);
}

proptest! {
    #[test]
    fn prop_prime_factors_multiply_back(n in 2u64..=MAX_PRIME) {
        let found = prime_factors(&BigInteger::from_u64(n)).unwrap();
        prop_assert_eq!(found.iter().product::<i64>(), n as i64);
        for factor in &found {
            prop_assert!(is_prime(&BigInteger::from_i64(*factor)).unwrap());
        }
        prop_assert!(found.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn prop_factors_divide(n in 1u64..5_000_000) {
        let found = factors(&BigInteger::from_u64(n)).unwrap();
        prop_assert_eq!(found.first(), Some(&1));
        prop_assert_eq!(found.last(), Some(&(n as i64)));
        for factor in &found {
            prop_assert_eq!(n % (*factor as u64), 0);
        }
        prop_assert_eq!(is_prime(&BigInteger::from_u64(n)).unwrap(), found.len() <= 2);
    }
}
