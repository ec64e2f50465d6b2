//! Terminal configuration loaded from the environment.

use crate::error::{AtmError, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Opening balance when `ATM_INITIAL_BALANCE` is unset.
pub const DEFAULT_INITIAL_BALANCE: u64 = 2000;

/// PIN when `ATM_PIN` is unset.
pub const DEFAULT_PIN: i64 = 9133;

pub const INITIAL_BALANCE_VAR: &str = "ATM_INITIAL_BALANCE";
pub const PIN_VAR: &str = "ATM_PIN";
pub const STATEMENT_VAR: &str = "ATM_STATEMENT";

/// Settings for one terminal run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtmConfig {
    pub initial_balance: u64,
    pub pin: i64,
    /// Where to write the CSV statement after a normal exit, if anywhere.
    pub statement_path: Option<PathBuf>,
}

impl Default for AtmConfig {
    fn default() -> Self {
        AtmConfig {
            initial_balance: DEFAULT_INITIAL_BALANCE,
            pin: DEFAULT_PIN,
            statement_path: None,
        }
    }
}

impl AtmConfig {
    /// Loads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads settings through `lookup`, falling back to defaults for
    /// missing or blank keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let initial_balance = match get(INITIAL_BALANCE_VAR) {
            Some(value) => parse_value(INITIAL_BALANCE_VAR, &value)?,
            None => DEFAULT_INITIAL_BALANCE,
        };
        let pin = match get(PIN_VAR) {
            Some(value) => parse_value(PIN_VAR, &value)?,
            None => DEFAULT_PIN,
        };
        let statement_path = get(STATEMENT_VAR).map(PathBuf::from);

        Ok(AtmConfig {
            initial_balance,
            pin,
            statement_path,
        })
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| AtmError::InvalidConfig {
        key,
        value: value.to_string(),
    })
}
