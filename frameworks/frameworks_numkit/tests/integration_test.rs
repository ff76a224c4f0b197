//! Integration tests for frameworks_numkit crate
//!
//! These drive the parsed command line end to end, from argument strings
//! through configuration to rendered output.

use clap::Parser;
use entities_numeric::keys;
use frameworks_numkit::{run, NumkitArgs, NumkitConfig};
use usecases_math::NumericCache;

fn numkit(argv: &[&str]) -> entities_numeric::Result<String> {
    let args = NumkitArgs::parse_from(std::iter::once("numkit").chain(argv.iter().copied()));
    let config = NumkitConfig::default().with_args(&args)?;
    run(&args.command, &config.math_context()?, &NumericCache::new())
}

#[test]
fn test_default_precision_is_34() {
    let root = numkit(&["sqrt", "2"]).unwrap();
    assert_eq!(root, "1.414213562373095048801688724209698");
}

#[test]
fn test_precision_flag() {
    assert_eq!(numkit(&["--precision", "10", "sqrt", "2"]).unwrap(), "1.414213562");
    assert_eq!(numkit(&["ln", "2", "--precision", "20"]).unwrap(), "0.69314718055994530942");
}

#[test]
fn test_rounding_flag() {
    let up = numkit(&["--precision", "3", "--rounding", "up", "sqrt", "2"]).unwrap();
    let down = numkit(&["--precision", "3", "--rounding", "down", "sqrt", "2"]).unwrap();
    assert_eq!(up, "1.42");
    assert_eq!(down, "1.41");
}

#[test]
fn test_bad_rounding_flag() {
    let err = numkit(&["--rounding", "sideways", "pi", "3"]).unwrap_err();
    assert_eq!(err.key(), keys::BAD_ROUNDING);
}

#[test]
fn test_bcd_round_trip_through_cli() {
    for value in ["0", "-7", "123.45", "0.000123", "-98765.4321"] {
        let hex = numkit(&["bcd-encode", value]).unwrap();
        assert_eq!(numkit(&["bcd-decode", &hex]).unwrap(), value, "via {}", hex);
    }
}

#[test]
fn test_negative_arguments() {
    assert_eq!(numkit(&["--precision", "5", "factorial", "-4"]).unwrap(), "-0.16667");
    assert_eq!(numkit(&["fib", "-2"]).unwrap(), "-1");
    assert_eq!(numkit(&["--precision", "10", "pow", "2", "-2"]).unwrap(), "0.25");
    assert_eq!(numkit(&["is-prime", "-97"]).unwrap(), "true");
}

#[test]
fn test_trig_subcommands() {
    assert_eq!(numkit(&["tan", "0"]).unwrap(), "0");
    assert_eq!(numkit(&["cos", "0"]).unwrap(), "1");
    assert_eq!(numkit(&["--precision", "20", "atan2", "1", "1"]).unwrap(), "0.78539816339744830962");
}

#[test]
fn test_bernoulli_index_out_of_range() {
    let err = numkit(&["bernoulli", "-9223372036854775808"]).unwrap_err();
    assert_eq!(err.key(), keys::OUT_OF_RANGE);
    assert_eq!(numkit(&["bernoulli", "4", "--rational"]).unwrap(), "-1/30");
}
