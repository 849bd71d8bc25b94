//! Status Classifier.

use serde::{Deserialize, Serialize};

/// Share of the safety stock at or below which a material is critical.
pub const CRITICAL_RATIO: f64 = 0.5;

/// Three-level stock status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Normal,
    Low,
    Critical,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Normal => "normal",
            StockStatus::Low => "low",
            StockStatus::Critical => "critical",
        }
    }

    /// `low` or `critical`: the material belongs on low-stock listings.
    pub fn needs_attention(&self) -> bool {
        !matches!(self, StockStatus::Normal)
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify current stock against the safety threshold.
///
/// Bands are checked in order and both bounds are inclusive:
/// `critical` when `current <= 0.5 * safety`, `low` when `current <= safety`,
/// otherwise `normal`. With `safety == 0` the `low` band is empty.
pub fn classify(current_stock: f64, safety_stock: f64) -> StockStatus {
    if current_stock <= safety_stock * CRITICAL_RATIO {
        StockStatus::Critical
    } else if current_stock <= safety_stock {
        StockStatus::Low
    } else {
        StockStatus::Normal
    }
}
