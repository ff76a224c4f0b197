//! Command-Line Argument Parsing Module
//!
//! Uses clap derive. The global flags apply to every subcommand and
//! override the environment (see [`config`](crate::config)).

use clap::{Parser, Subcommand};

/// numkit command-line arguments
#[derive(Parser, Debug)]
#[command(name = "numkit")]
#[command(about = "Arbitrary precision numeric toolkit")]
pub struct NumkitArgs {
    /// Significant digits in results
    #[arg(long, global = true)]
    pub precision: Option<u32>,

    /// Rounding mode: up, down, ceiling, floor, half_up, half_down, half_even
    #[arg(long, global = true)]
    pub rounding: Option<String>,

    /// Log filter (e.g., "debug", "usecases_math=trace")
    #[arg(long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// π to a number of decimal places
    Pi { digits: u32 },

    /// e to a number of decimal places
    E { digits: u32 },

    /// Sine of an angle in radians
    Sin {
        #[arg(allow_negative_numbers = true)]
        x: String,
    },

    /// Cosine of an angle in radians
    Cos {
        #[arg(allow_negative_numbers = true)]
        x: String,
    },

    /// Tangent of an angle in radians
    Tan {
        #[arg(allow_negative_numbers = true)]
        x: String,
    },

    /// Two-argument arctangent of y/x, in (-π, π]
    Atan2 {
        #[arg(allow_negative_numbers = true)]
        y: String,
        #[arg(allow_negative_numbers = true)]
        x: String,
    },

    /// e raised to x
    Exp {
        #[arg(allow_negative_numbers = true)]
        x: String,
    },

    /// Natural logarithm
    Ln {
        #[arg(allow_negative_numbers = true)]
        x: String,
    },

    /// Base-2 logarithm
    Log2 {
        #[arg(allow_negative_numbers = true)]
        x: String,
    },

    /// Square root
    Sqrt {
        #[arg(allow_negative_numbers = true)]
        x: String,
    },

    /// Cube root
    Cbrt {
        #[arg(allow_negative_numbers = true)]
        x: String,
    },

    /// The golden ratio
    Phi {
        /// Print 1/φ instead
        #[arg(long)]
        reciprocal: bool,
    },

    /// base raised to exponent
    Pow {
        #[arg(allow_negative_numbers = true)]
        base: String,
        #[arg(allow_negative_numbers = true)]
        exponent: f64,
    },

    /// n! (Roman factorial for negative n)
    Factorial {
        #[arg(allow_negative_numbers = true)]
        n: String,
    },

    /// nth Fibonacci number
    Fib {
        #[arg(allow_negative_numbers = true)]
        n: String,
    },

    /// nth Bernoulli number
    Bernoulli {
        #[arg(allow_negative_numbers = true)]
        n: i64,

        /// Print the exact fraction instead of a rounded decimal
        #[arg(long)]
        rational: bool,
    },

    /// Primality test, optionally listing factors
    IsPrime {
        #[arg(allow_negative_numbers = true)]
        n: String,

        /// Also print every divisor
        #[arg(long)]
        factors: bool,

        /// Also print the prime factorization
        #[arg(long)]
        prime_factors: bool,
    },

    /// Encode a decimal as BCD, printed as hex
    BcdEncode {
        #[arg(allow_negative_numbers = true)]
        value: String,
    },

    /// Decode hex BCD bytes back to decimal text
    BcdDecode { hex: String },
}
