//! Stress run configuration.
//!
//! Values come from environment variables, each optional:
//!
//! | Variable                       | Field           | Default   |
//! |--------------------------------|-----------------|-----------|
//! | `RANDBST_STRESS_COUNT`         | `count`         | 100000    |
//! | `RANDBST_STRESS_ORDERED`       | `ordered`       | false     |
//! | `RANDBST_STRESS_CHECK_MIN_MAX` | `check_min_max` | true      |
//! | `RANDBST_STRESS_VERIFY_EVERY`  | `verify_every`  | 100000    |
//! | `RANDBST_STRESS_REPORT_EVERY`  | `report_every`  | 10000     |
//! | `RANDBST_STRESS_SEED`          | `seed`          | (entropy) |

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::ConfigError;

/// Parameters for [`fill`](super::fill) and [`drain`](super::drain).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StressConfig {
    /// Number of puts performed by `fill`.
    pub count: usize,
    /// Insert keys `0..count` in order (value `2 * key`) instead of random keys.
    pub ordered: bool,
    /// Check `min_key`/`max_key` against tracked extremes after every put.
    pub check_min_max: bool,
    /// Run `verify` every this many operations; zero disables it.
    pub verify_every: usize,
    /// Emit a progress event every this many operations; zero disables it.
    pub report_every: usize,
    /// Seed for key generation and tree balancing; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            count: 100_000,
            ordered: false,
            check_min_max: true,
            verify_every: 100_000,
            report_every: 10_000,
            seed: None,
        }
    }
}

impl StressConfig {
    /// Loads configuration from `RANDBST_STRESS_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set but does not parse.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use randbst::stress::StressConfig;
    ///
    /// let config = StressConfig::from_lookup(|key| match key {
    ///     "RANDBST_STRESS_COUNT" => Some("500".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.count, 500);
    /// assert!(config.check_min_max);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            count: parsed(&lookup, "RANDBST_STRESS_COUNT", defaults.count)?,
            ordered: parsed(&lookup, "RANDBST_STRESS_ORDERED", defaults.ordered)?,
            check_min_max: parsed(&lookup, "RANDBST_STRESS_CHECK_MIN_MAX", defaults.check_min_max)?,
            verify_every: parsed(&lookup, "RANDBST_STRESS_VERIFY_EVERY", defaults.verify_every)?,
            report_every: parsed(&lookup, "RANDBST_STRESS_REPORT_EVERY", defaults.report_every)?,
            seed: lookup("RANDBST_STRESS_SEED")
                .map(|value| parse_value("RANDBST_STRESS_SEED", &value))
                .transpose()?,
        })
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup(key).map_or(Ok(default), |value| parse_value(key, &value))
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|error: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: error.to_string(),
        })
}
