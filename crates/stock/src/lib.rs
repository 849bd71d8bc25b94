//! Stock calculation and reorder recommendation core.
//!
//! Derives current stock, safety status and recommended purchase quantities
//! from a material's receipts and consumptions, and rolls them up into
//! dashboard summaries, trends and prioritised recommendations.
//!
//! Pure and synchronous: all data arrives through a [`LedgerReader`] and no
//! state survives a call.

pub mod calculator;
pub mod digest;
pub mod engine;
pub mod enrichment;
pub mod error;
pub mod fleet;
pub mod ledger;
pub mod policy;
pub mod reorder;
pub mod status;

pub use calculator::current_stock;
pub use digest::low_stock_digest;
pub use engine::StockEngine;
pub use enrichment::{EnrichedMaterial, enrich_material};
pub use error::{LedgerError, StockError, StockResult};
pub use fleet::{
    ActivityCounts, CategoryCount, ConsumptionTrend, DailyReport, DashboardSummary, FleetView,
    LowStockEntry, MaterialStatistics, MaterialSummary, Priority, Recommendation, Recommendations, StatusCounts,
    StockStatusOverview, TrendPoint, daily_series,
};
pub use ledger::{LedgerMovement, LedgerReader, LedgerTotals};
pub use policy::{DEFAULT_RECENT_WINDOW_DAYS, DEFAULT_TREND_DAYS, StockPolicy};
pub use reorder::{REORDER_BUFFER, recommended_po};
pub use status::{CRITICAL_RATIO, StockStatus, classify};
