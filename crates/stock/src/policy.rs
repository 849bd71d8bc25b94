//! Engine policy: the tunable windows of the fleet aggregations.

use serde::{Deserialize, Serialize};

use crate::error::{StockError, StockResult};

pub const DEFAULT_RECENT_WINDOW_DAYS: i64 = 30;
pub const DEFAULT_TREND_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockPolicy {
    /// Trailing window for the dashboard's recent receipt/consumption counts.
    pub recent_window_days: i64,
    /// Trend window used when the caller does not name one.
    pub default_trend_days: i64,
}

impl StockPolicy {
    pub fn new(recent_window_days: i64, default_trend_days: i64) -> StockResult<Self> {
        ensure_window("recent_window_days", recent_window_days)?;
        ensure_window("default_trend_days", default_trend_days)?;
        Ok(Self {
            recent_window_days,
            default_trend_days,
        })
    }
}

impl Default for StockPolicy {
    fn default() -> Self {
        Self {
            recent_window_days: DEFAULT_RECENT_WINDOW_DAYS,
            default_trend_days: DEFAULT_TREND_DAYS,
        }
    }
}

/// Day windows must be non-negative; they are rejected, never clamped.
pub fn ensure_window(name: &str, days: i64) -> StockResult<()> {
    if days < 0 {
        return Err(StockError::invalid_input(format!(
            "{name} must be non-negative (got {days})"
        )));
    }
    Ok(())
}
