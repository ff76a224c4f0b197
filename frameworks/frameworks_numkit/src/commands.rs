//! Command Execution Module
//!
//! Runs one parsed [`Command`] and renders its result as the text the
//! binary prints. Nothing here writes to stdout, so every command can be
//! driven from tests.

use crate::args::Command;
use entities_numeric::{keys, BigDecimal, BigInteger, MathContext, NumericError, Result};
use infrastructure_bcd_encoding::BcdCodec;
use tracing::debug;
use usecases_math as math;
use usecases_math::NumericCache;
use usecases_primality as primality;

fn decimal(text: &str) -> Result<BigDecimal> {
    text.trim().parse()
}

fn integer(text: &str) -> Result<BigInteger> {
    text.trim().parse()
}

/// Lowercase hex, two characters per byte
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Parse hex text (case-insensitive, optional `0x`, whitespace ignored).
pub fn from_hex(text: &str) -> Result<Vec<u8>> {
    let bad = || NumericError::invalid(keys::BAD_BCD, format!("{:?} is not hex", text));
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: Vec<u8> = body.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(bad());
    }
    digits
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(bad)
        })
        .collect()
}

fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Execute `command` under `ctx`, sharing `cache` between calls.
pub fn run(command: &Command, ctx: &MathContext, cache: &NumericCache) -> Result<String> {
    debug!(?command, %ctx, "running command");
    let output = match command {
        Command::Pi { digits } => math::pi(cache, *digits)?.to_string(),
        Command::E { digits } => math::e(cache, *digits)?.to_string(),
        Command::Sin { x } => math::sin(cache, &decimal(x)?, ctx)?.to_string(),
        Command::Cos { x } => math::cos(cache, &decimal(x)?, ctx)?.to_string(),
        Command::Tan { x } => math::tan(cache, &decimal(x)?, ctx)?.to_string(),
        Command::Atan2 { y, x } => math::atan2(cache, &decimal(y)?, &decimal(x)?, ctx)?.to_string(),
        Command::Exp { x } => math::exp(cache, &decimal(x)?, ctx)?.to_string(),
        Command::Ln { x } => math::ln(cache, &decimal(x)?, ctx)?.to_string(),
        Command::Log2 { x } => math::log2(&decimal(x)?, ctx)?.to_string(),
        Command::Sqrt { x } => math::sqrt(&decimal(x)?, ctx)?.to_string(),
        Command::Cbrt { x } => math::cbrt(&decimal(x)?, ctx)?.to_string(),
        Command::Phi { reciprocal } => math::phi(ctx, *reciprocal)?.to_string(),
        Command::Pow { base, exponent } => math::pow(&decimal(base)?, *exponent, ctx)?.to_string(),
        Command::Factorial { n } => math::factorial(&decimal(n)?, ctx)?.to_string(),
        Command::Fib { n } => math::fib(&decimal(n)?)?.to_string(),
        Command::Bernoulli { n, rational } => {
            math::bernoulli(cache, *n, ctx, *rational)?.to_string()
        }
        Command::IsPrime {
            n,
            factors,
            prime_factors,
        } => {
            let n = integer(n)?;
            let mut lines = vec![primality::is_prime(&n)?.to_string()];
            if *factors {
                lines.push(format!("factors: {}", join(&primality::factors(&n)?)));
            }
            if *prime_factors {
                lines.push(format!(
                    "prime factors: {}",
                    join(&primality::prime_factors(&n)?)
                ));
            }
            lines.join("\n")
        }
        Command::BcdEncode { value } => to_hex(&BcdCodec::encode(value.trim())?),
        Command::BcdDecode { hex } => BcdCodec::decode(&from_hex(hex)?)?,
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(precision: u32) -> MathContext {
        MathContext::with_precision(precision).unwrap()
    }

    fn run_with(command: Command, precision: u32) -> Result<String> {
        run(&command, &ctx(precision), &NumericCache::new())
    }

    #[test]
    fn test_hex() {
        assert_eq!(to_hex(&[0x03, 0x12, 0xAB]), "0312ab");
        assert_eq!(from_hex("0x03 12 AB").unwrap(), vec![0x03, 0x12, 0xAB]);
        assert_eq!(from_hex("abc").unwrap_err().key(), keys::BAD_BCD);
        assert_eq!(from_hex("zz").unwrap_err().key(), keys::BAD_BCD);
        assert!(from_hex("").unwrap().is_empty());
    }

    #[test]
    fn test_constants() {
        assert_eq!(run_with(Command::Pi { digits: 10 }, 5).unwrap(), "3.1415926535");
        assert_eq!(run_with(Command::E { digits: 5 }, 5).unwrap(), "2.71828");
        assert_eq!(
            run_with(Command::Phi { reciprocal: false }, 20).unwrap(),
            "1.6180339887498948482"
        );
    }

    #[test]
    fn test_functions() {
        let x = || "1".to_string();
        assert_eq!(run_with(Command::Sin { x: x() }, 20).unwrap(), "0.84147098480789650665");
        assert_eq!(run_with(Command::Sqrt { x: "2".to_string() }, 20).unwrap(), "1.4142135623730950488");
        assert_eq!(run_with(Command::Log2 { x: "1024".to_string() }, 20).unwrap(), "10");
        assert_eq!(run_with(Command::Cbrt { x: "-8".to_string() }, 20).unwrap(), "-2");
    }

    #[test]
    fn test_integer_sequences() {
        assert_eq!(run_with(Command::Factorial { n: "5".to_string() }, 10).unwrap(), "120");
        assert_eq!(run_with(Command::Factorial { n: "-4".to_string() }, 5).unwrap(), "-0.16667");
        assert_eq!(run_with(Command::Fib { n: "10".to_string() }, 10).unwrap(), "55");
        assert_eq!(
            run_with(Command::Bernoulli { n: 20, rational: true }, 10).unwrap(),
            "-174611/330"
        );
    }

    #[test]
    fn test_is_prime_with_factors() {
        let command = Command::IsPrime {
            n: "12".to_string(),
            factors: true,
            prime_factors: true,
        };
        assert_eq!(
            run_with(command, 10).unwrap(),
            "false\nfactors: 1 2 3 4 6 12\nprime factors: 2 2 3"
        );
        let command = Command::IsPrime {
            n: "97".to_string(),
            factors: false,
            prime_factors: false,
        };
        assert_eq!(run_with(command, 10).unwrap(), "true");
    }

    #[test]
    fn test_bcd_commands() {
        let encoded = run_with(Command::BcdEncode { value: "123.45".to_string() }, 10).unwrap();
        assert_eq!(encoded, "0312345c");
        let decoded = run_with(Command::BcdDecode { hex: encoded }, 10).unwrap();
        assert_eq!(decoded, "123.45");
        assert_eq!(
            run_with(Command::BcdEncode { value: "-0.005".to_string() }, 10).unwrap(),
            "fe5d"
        );
    }

    #[test]
    fn test_errors_carry_keys() {
        let err = run_with(Command::Sqrt { x: "-1".to_string() }, 10).unwrap_err();
        assert_eq!(err.key(), keys::SQRT_NEGATIVE);
        let err = run_with(Command::Sin { x: "one".to_string() }, 10).unwrap_err();
        assert_eq!(err.key(), keys::BAD_NUMBER);
        let err = run_with(Command::Fib { n: "2.5".to_string() }, 10).unwrap_err();
        assert_eq!(err.key(), keys::WHOLE_INTEGER);
        let command = Command::IsPrime {
            n: "4294967296".to_string(),
            factors: false,
            prime_factors: false,
        };
        assert_eq!(run_with(command, 10).unwrap_err().key(), keys::PRIME_TOO_BIG);
    }
}
