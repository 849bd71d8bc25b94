//! Fleet Aggregator: roll enriched materials up into listings and summaries.
//!
//! Everything here is pure. [`FleetView`] holds one enrichment pass over a
//! material population; low-stock listings, the status overview and
//! recommendations are all derived from that single pass.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use zencore_core::MaterialId;
use zencore_materials::{ItemType, Material};

use crate::enrichment::{EnrichedMaterial, enrich_material};
use crate::error::LedgerError;
use crate::ledger::{LedgerMovement, LedgerReader};
use crate::status::StockStatus;

/// Enriched views for a caller-selected population, in enumeration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FleetView {
    items: Vec<EnrichedMaterial>,
}

impl FleetView {
    pub fn new(items: Vec<EnrichedMaterial>) -> Self {
        Self { items }
    }

    /// Enrich every material once, preserving order.
    pub fn build<R>(reader: &R, materials: Vec<Material>) -> Result<Self, LedgerError>
    where
        R: LedgerReader + ?Sized,
    {
        let items = materials
            .into_iter()
            .map(|m| enrich_material(reader, m))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { items })
    }

    pub fn items(&self) -> &[EnrichedMaterial] {
        &self.items
    }

    pub fn into_items(self) -> Vec<EnrichedMaterial> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Materials whose status is `low` or `critical`, in population order.
    pub fn low_stock(&self) -> Vec<EnrichedMaterial> {
        self.items
            .iter()
            .filter(|m| m.needs_attention())
            .cloned()
            .collect()
    }

    /// Status tally, overall and per category.
    pub fn status_overview(&self) -> StockStatusOverview {
        let mut overview = StockStatusOverview::default();
        for item in &self.items {
            overview.overall.record(item.stock_status);
            overview
                .by_category
                .entry(item.material.category_label().to_string())
                .or_default()
                .record(item.stock_status);
        }
        overview
    }

    /// Prioritised purchase recommendations.
    ///
    /// Only `low`/`critical` materials with a positive recommended quantity
    /// qualify. All `high` entries precede all `medium` ones; order within a
    /// tier is the population order.
    pub fn recommendations(&self) -> Recommendations {
        let mut items: Vec<Recommendation> = self
            .items
            .iter()
            .filter_map(Recommendation::for_material)
            .collect();

        // Stable sort: a partition by priority, nothing more.
        items.sort_by_key(|r| r.priority);

        Recommendations {
            total: items.len(),
            items,
        }
    }

    /// Counts by item type, COA coverage, and critical physical materials.
    pub fn material_statistics(&self) -> MaterialStatistics {
        let mut stats = MaterialStatistics::default();
        for item in &self.items {
            match item.material.item_type {
                ItemType::Material => {
                    stats.total_materials += 1;
                    if item.stock_status == StockStatus::Critical {
                        stats.critical_stock_count += 1;
                    }
                }
                ItemType::Service => stats.total_services += 1,
            }
            if item.material.has_coa {
                stats.materials_with_coa += 1;
            }
        }
        stats.total_items = stats.total_materials + stats.total_services;
        stats
    }

    /// Stock rollup of the whole population as of `as_of`.
    pub fn daily_report(&self, as_of: DateTime<Utc>) -> DailyReport {
        DailyReport {
            date: as_of,
            total_materials: self.items.len(),
            materials_summary: self.items.iter().map(MaterialSummary::from).collect(),
        }
    }

    /// Active-material count per category label.
    pub fn category_distribution(&self) -> Vec<CategoryCount> {
        let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.material.category_label()).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.to_string(),
                count,
            })
            .collect()
    }
}

/// Per-status counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    pub normal: usize,
    pub low: usize,
    pub critical: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: StockStatus) {
        match status {
            StockStatus::Normal => self.normal += 1,
            StockStatus::Low => self.low += 1,
            StockStatus::Critical => self.critical += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.normal + self.low + self.critical
    }
}

/// Stock status overview.
///
/// Materials without a category are grouped under `"uncategorized"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StockStatusOverview {
    pub overall: StatusCounts,
    pub by_category: BTreeMap<String, StatusCounts>,
}

/// Recommendation priority. `High` sorts before `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

/// A single purchase recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub material_id: MaterialId,
    pub material_code: String,
    pub material_name: String,
    pub current_stock: f64,
    pub safety_stock: f64,
    pub recommended_po: f64,
    pub priority: Priority,
}

impl Recommendation {
    fn for_material(item: &EnrichedMaterial) -> Option<Self> {
        let priority = match item.stock_status {
            StockStatus::Critical => Priority::High,
            StockStatus::Low => Priority::Medium,
            StockStatus::Normal => return None,
        };
        if item.recommended_po <= 0.0 {
            return None;
        }
        Some(Self {
            material_id: item.material.id,
            material_code: item.material.code.clone(),
            material_name: item.material.name.clone(),
            current_stock: item.current_stock,
            safety_stock: item.material.safety_stock,
            recommended_po: item.recommended_po,
            priority,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recommendations {
    pub items: Vec<Recommendation>,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaterialStatistics {
    pub total_materials: usize,
    pub total_services: usize,
    pub total_items: usize,
    pub materials_with_coa: usize,
    /// Active physical materials (services excluded) in `critical` status.
    pub critical_stock_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Compact low-stock row for dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockEntry {
    pub id: MaterialId,
    pub code: String,
    pub name: String,
    pub current_stock: f64,
    pub safety_stock: f64,
    pub stock_status: StockStatus,
}

impl From<&EnrichedMaterial> for LowStockEntry {
    fn from(item: &EnrichedMaterial) -> Self {
        Self {
            id: item.material.id,
            code: item.material.code.clone(),
            name: item.material.name.clone(),
            current_stock: item.current_stock,
            safety_stock: item.material.safety_stock,
            stock_status: item.stock_status,
        }
    }
}

/// Dashboard summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_materials: usize,
    pub total_services: usize,
    pub total_items: usize,
    pub low_stock_materials_count: usize,
    /// Purchase orders in `pending` status.
    pub active_purchase_orders: usize,
    /// Length of the trailing window used for the two recent counts.
    pub recent_window_days: i64,
    pub recent_receipts: usize,
    pub recent_consumptions: usize,
    pub materials_with_coa: usize,
    pub category_distribution: Vec<CategoryCount>,
    pub low_stock_materials: Vec<LowStockEntry>,
}

/// Ledger-side figures the dashboard needs besides the fleet pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivityCounts {
    pub pending_purchase_orders: usize,
    pub recent_receipts: usize,
    pub recent_consumptions: usize,
}

impl DashboardSummary {
    pub fn compile(fleet: &FleetView, activity: ActivityCounts, recent_window_days: i64) -> Self {
        let stats = fleet.material_statistics();
        let low_stock: Vec<LowStockEntry> = fleet
            .items()
            .iter()
            .filter(|m| m.needs_attention())
            .map(LowStockEntry::from)
            .collect();

        Self {
            total_materials: stats.total_materials,
            total_services: stats.total_services,
            total_items: stats.total_items,
            low_stock_materials_count: low_stock.len(),
            active_purchase_orders: activity.pending_purchase_orders,
            recent_window_days,
            recent_receipts: activity.recent_receipts,
            recent_consumptions: activity.recent_consumptions,
            materials_with_coa: stats.materials_with_coa,
            category_distribution: fleet.category_distribution(),
            low_stock_materials: low_stock,
        }
    }
}

/// One row of the daily stock report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSummary {
    pub code: String,
    pub name: String,
    pub current_stock: f64,
    pub safety_stock: f64,
    pub status: StockStatus,
}

impl From<&EnrichedMaterial> for MaterialSummary {
    fn from(item: &EnrichedMaterial) -> Self {
        Self {
            code: item.material.code.clone(),
            name: item.material.name.clone(),
            current_stock: item.current_stock,
            safety_stock: item.material.safety_stock,
            status: item.stock_status,
        }
    }
}

/// Daily stock report over every active item, in population order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub date: DateTime<Utc>,
    pub total_materials: usize,
    pub materials_summary: Vec<MaterialSummary>,
}

/// One day of aggregated movement quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub quantity: f64,
}

/// Daily consumption and receipt series over a trailing window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConsumptionTrend {
    pub days: i64,
    pub consumption: Vec<TrendPoint>,
    pub receipts: Vec<TrendPoint>,
}

/// Group movements by UTC calendar day, ascending by date.
///
/// Days without movements are omitted rather than zero-filled.
pub fn daily_series(movements: &[LedgerMovement]) -> Vec<TrendPoint> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for movement in movements {
        *by_day.entry(movement.occurred_at.date_naive()).or_default() += movement.quantity;
    }
    by_day
        .into_iter()
        .map(|(date, quantity)| TrendPoint { date, quantity })
        .collect()
}
