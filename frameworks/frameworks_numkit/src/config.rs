//! Configuration Module
//!
//! Settings are layered: built-in defaults, then `NUMKIT_*` environment
//! variables, then command-line flags. The result is validated into a
//! [`MathContext`] before any computation runs.

use crate::args::NumkitArgs;
use entities_numeric::{keys, MathContext, NumericError, Result, RoundingMode};
use std::env;

pub const DEFAULT_PRECISION: u32 = 34;
pub const DEFAULT_LOG: &str = "warn";

pub const ENV_PRECISION: &str = "NUMKIT_PRECISION";
pub const ENV_ROUNDING: &str = "NUMKIT_ROUNDING";
pub const ENV_LOG: &str = "NUMKIT_LOG";

/// Resolved numkit settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumkitConfig {
    pub precision: u32,
    pub rounding: RoundingMode,
    /// `EnvFilter` directive string
    pub log: String,
}

impl Default for NumkitConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            rounding: RoundingMode::HalfUp,
            log: DEFAULT_LOG.to_string(),
        }
    }
}

fn parse_precision(text: &str) -> Result<u32> {
    text.trim()
        .parse()
        .map_err(|_| NumericError::invalid(keys::BAD_PRECISION, text.to_string()))
}

impl NumkitConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(text) = lookup(ENV_PRECISION) {
            config.precision = parse_precision(&text)?;
        }
        if let Some(text) = lookup(ENV_ROUNDING) {
            config.rounding = text.trim().parse()?;
        }
        if let Some(text) = lookup(ENV_LOG) {
            config.log = text;
        }
        Ok(config)
    }

    /// Apply the command-line flags on top.
    pub fn with_args(mut self, args: &NumkitArgs) -> Result<Self> {
        if let Some(precision) = args.precision {
            self.precision = precision;
        }
        if let Some(rounding) = &args.rounding {
            self.rounding = rounding.parse()?;
        }
        if let Some(log) = &args.log {
            self.log = log.clone();
        }
        Ok(self)
    }

    /// # Errors
    /// `InvalidArgument` (`BAD_PRECISION`) when the precision is zero or too
    /// large.
    pub fn math_context(&self) -> Result<MathContext> {
        MathContext::new(self.precision, self.rounding)
    }
}
