//! Environment configuration.

use thiserror::Error;

use zencore_stock::{DEFAULT_RECENT_WINDOW_DAYS, DEFAULT_TREND_DAYS, StockPolicy};

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const RECENT_WINDOW_DAYS: &str = "ZENCORE_RECENT_WINDOW_DAYS";
pub const TREND_DAYS: &str = "ZENCORE_TREND_DAYS";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a whole number of days (got {value:?})")]
    NotANumber { name: &'static str, value: String },

    #[error("{name} must be non-negative (got {value})")]
    Negative { name: &'static str, value: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Postgres connection string; `None` selects the in-memory ledger.
    pub database_url: Option<String>,
    pub recent_window_days: i64,
    pub trend_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            recent_window_days: DEFAULT_RECENT_WINDOW_DAYS,
            trend_days: DEFAULT_TREND_DAYS,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through `lookup`, which returns the raw value of a variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL).filter(|url| !url.trim().is_empty());
        if database_url.is_none() {
            tracing::warn!("DATABASE_URL not set; using in-memory ledger");
        }

        Ok(Self {
            database_url,
            recent_window_days: days(&lookup, RECENT_WINDOW_DAYS, DEFAULT_RECENT_WINDOW_DAYS)?,
            trend_days: days(&lookup, TREND_DAYS, DEFAULT_TREND_DAYS)?,
        })
    }

    pub fn policy(&self) -> StockPolicy {
        StockPolicy {
            recent_window_days: self.recent_window_days,
            default_trend_days: self.trend_days,
        }
    }
}

fn days<F>(lookup: &F, name: &'static str, default: i64) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        tracing::debug!(variable = name, default, "using default window");
        return Ok(default);
    };

    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ConfigError::NotANumber {
            name,
            value: raw.clone(),
        })?;
    if value < 0 {
        return Err(ConfigError::Negative { name, value });
    }
    Ok(value)
}
