//! Runtime configuration read from `BLOCKFALL_*` environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::types::{DEFAULT_ARR_MS, DEFAULT_DAS_MS, TICK_MS};

pub const ENV_SEED: &str = "BLOCKFALL_SEED";
pub const ENV_DAS_MS: &str = "BLOCKFALL_DAS_MS";
pub const ENV_ARR_MS: &str = "BLOCKFALL_ARR_MS";
pub const ENV_TICK_MS: &str = "BLOCKFALL_TICK_MS";
pub const ENV_LOG_PATH: &str = "BLOCKFALL_LOG_PATH";
pub const ENV_LOG: &str = "BLOCKFALL_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fixed seed for piece selection; `None` seeds from entropy
    pub seed: Option<u64>,
    pub das_ms: u32,
    pub arr_ms: u32,
    pub tick_ms: u32,
    /// Log file; logging stays off without one
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            tick_ms: TICK_MS,
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let tick_ms = parse_var(ENV_TICK_MS, get(ENV_TICK_MS))?.unwrap_or(defaults.tick_ms);
        anyhow::ensure!(tick_ms > 0, "{ENV_TICK_MS} must be greater than zero");

        Ok(Self {
            seed: parse_var(ENV_SEED, get(ENV_SEED))?,
            das_ms: parse_var(ENV_DAS_MS, get(ENV_DAS_MS))?.unwrap_or(defaults.das_ms),
            arr_ms: parse_var(ENV_ARR_MS, get(ENV_ARR_MS))?.unwrap_or(defaults.arr_ms),
            tick_ms,
            log_path: get(ENV_LOG_PATH).map(PathBuf::from),
            log_filter: get(ENV_LOG).unwrap_or(defaults.log_filter),
        })
    }
}

fn parse_var<T>(key: &str, raw: Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.map(|v| {
        v.parse::<T>()
            .with_context(|| format!("invalid value {v:?} for {key}"))
    })
    .transpose()
}
