//! Frameworks Layer: numkit
//!
//! Command-line front end for the numeric kernel.
//!
//! ## Overview
//!
//! The `numkit` binary parses its arguments with clap, resolves settings
//! from defaults, the environment and flags, installs a `tracing`
//! subscriber and runs a single command against a
//! [`NumericCache`](usecases_math::NumericCache) created in `main`.
//!
//! ## Modules
//!
//! - **[`args`](args/index.html)**: Command-line arguments and subcommands
//! - **[`config`](config/index.html)**: Layered settings and the resulting `MathContext`
//! - **[`commands`](commands/index.html)**: Executes a command and renders its output
//! - **[`logging`](logging/index.html)**: Log subscriber setup
//!
//! ## See Also
//!
//! - [`usecases_math`](../usecases_math/index.html): Transcendental functions
//! - [`usecases_primality`](../usecases_primality/index.html): Primality testing
//! - [`infrastructure_bcd_encoding`](../infrastructure_bcd_encoding/index.html): BCD codec

pub mod args;
pub mod commands;
pub mod config;
pub mod logging;

pub use args::{Command, NumkitArgs};
pub use commands::run;
pub use config::NumkitConfig;
pub use logging::init_logging;
