//! Configuration loading and representation.
//!
//! Everything is read from environment variables:
//!
//! | variable                 | values            | default                     |
//! |--------------------------|-------------------|-----------------------------|
//! | `SERI_ARCADE_DATA_DIR`   | path              | `{os data dir}/seri-arcade` |
//! | `SERI_ARCADE_PERIOD`     | `local` \| `utc`  | `local`                     |
//! | `SERI_ARCADE_LOG_FORMAT` | `json` \| `pretty`| `json`                      |

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use seri_arcade_core::{LocalDayClock, PeriodClock, UtcDayClock};
use thiserror::Error;

pub const DATA_DIR_VAR: &str = "SERI_ARCADE_DATA_DIR";
pub const PERIOD_VAR: &str = "SERI_ARCADE_PERIOD";
pub const LOG_FORMAT_VAR: &str = "SERI_ARCADE_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} (expected one of: {expected})")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Which calendar decides when a new allowance period begins.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PeriodPolicy {
    /// Local-timezone calendar day.
    #[default]
    LocalDay,
    /// UTC calendar day.
    UtcDay,
}

impl PeriodPolicy {
    pub fn clock(self) -> Arc<dyn PeriodClock> {
        match self {
            PeriodPolicy::LocalDay => Arc::new(LocalDayClock),
            PeriodPolicy::UtcDay => Arc::new(UtcDayClock),
        }
    }
}

impl FromStr for PeriodPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(PeriodPolicy::LocalDay),
            "utc" => Ok(PeriodPolicy::UtcDay),
            _ => Err(ConfigError::InvalidValue {
                var: PERIOD_VAR,
                value: s.to_string(),
                expected: "local, utc",
            }),
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(ConfigError::InvalidValue {
                var: LOG_FORMAT_VAR,
                value: s.to_string(),
                expected: "json, pretty",
            }),
        }
    }
}

/// Runtime configuration of the portal shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    pub data_dir: PathBuf,
    pub period: PeriodPolicy,
    pub log_format: LogFormat,
}

impl PortalConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            period: PeriodPolicy::default(),
            log_format: LogFormat::default(),
        }
    }

    pub fn with_period(mut self, period: PeriodPolicy) -> Self {
        self.period = period;
        self
    }

    pub fn with_log_format(mut self, log_format: LogFormat) -> Self {
        self.log_format = log_format;
        self
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let period = lookup(PERIOD_VAR)
            .map(|v| v.parse::<PeriodPolicy>())
            .transpose()
            .context("failed to parse allowance period policy")?
            .unwrap_or_default();

        let log_format = lookup(LOG_FORMAT_VAR)
            .map(|v| v.parse::<LogFormat>())
            .transpose()
            .context("failed to parse log format")?
            .unwrap_or_default();

        Ok(Self {
            data_dir,
            period,
            log_format,
        })
    }
}

/// Resolve the default data directory: `{app_data_dir}/seri-arcade`.
pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    dir.push("seri-arcade");
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn explicit_values_are_used() {
        let config = PortalConfig::from_lookup(lookup_from(&[
            (DATA_DIR_VAR, "/tmp/arcade"),
            (PERIOD_VAR, "UTC"),
            (LOG_FORMAT_VAR, "pretty"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/arcade"));
        assert_eq!(config.period, PeriodPolicy::UtcDay);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn period_and_format_default_when_unset() {
        let config =
            PortalConfig::from_lookup(lookup_from(&[(DATA_DIR_VAR, "/tmp/arcade")])).unwrap();
        assert_eq!(config.period, PeriodPolicy::LocalDay);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn unknown_period_is_a_config_error() {
        let err = PortalConfig::from_lookup(lookup_from(&[
            (DATA_DIR_VAR, "/tmp/arcade"),
            (PERIOD_VAR, "rolling-24h"),
        ]))
        .unwrap_err();

        let cause = err.downcast_ref::<ConfigError>().unwrap();
        assert!(matches!(cause, ConfigError::InvalidValue { var: PERIOD_VAR, .. }));
    }
}
