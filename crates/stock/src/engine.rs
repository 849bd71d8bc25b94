//! `StockEngine`: the service-facing surface of the stock core.
//!
//! Holds no state besides the reader and the policy; every call recomputes
//! from the ledger as the reader presents it.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, instrument, warn};

use zencore_core::MaterialId;
use zencore_materials::Material;

use crate::calculator::current_stock;
use crate::digest::low_stock_digest;
use crate::enrichment::EnrichedMaterial;
use crate::error::{LedgerError, StockError, StockResult};
use crate::fleet::{
    ActivityCounts, ConsumptionTrend, DailyReport, DashboardSummary, FleetView, MaterialStatistics,
    Recommendations, StockStatusOverview, daily_series,
};
use crate::ledger::{LedgerReader, LedgerTotals};
use crate::policy::{StockPolicy, ensure_window};
use crate::reorder::recommended_po;
use crate::status::{StockStatus, classify};

#[derive(Debug, Clone)]
pub struct StockEngine<R> {
    reader: R,
    policy: StockPolicy,
}

impl<R> StockEngine<R>
where
    R: LedgerReader,
{
    pub fn new(reader: R) -> Self {
        Self::with_policy(reader, StockPolicy::default())
    }

    pub fn with_policy(reader: R, policy: StockPolicy) -> Self {
        Self { reader, policy }
    }

    pub fn policy(&self) -> StockPolicy {
        self.policy
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Current on-hand quantity. Fails `NotFound` for unknown materials.
    #[instrument(level = "debug", skip(self))]
    pub fn current_stock(&self, material_id: MaterialId) -> StockResult<f64> {
        let material = self.require_material(material_id)?;
        self.stock_of(&material)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn stock_status(&self, material_id: MaterialId) -> StockResult<StockStatus> {
        let material = self.require_material(material_id)?;
        let stock = self.stock_of(&material)?;
        Ok(classify(stock, material.safety_stock))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn recommended_po(&self, material_id: MaterialId) -> StockResult<f64> {
        let material = self.require_material(material_id)?;
        let stock = self.stock_of(&material)?;
        Ok(recommended_po(
            material.safety_stock,
            material.monthly_forecast,
            stock,
        ))
    }

    /// Dates of the most recent receipt and consumption.
    #[instrument(level = "debug", skip(self))]
    pub fn last_activity_dates(
        &self,
        material_id: MaterialId,
    ) -> StockResult<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
        self.require_material(material_id)?;
        let last_receipt = self
            .reader
            .last_receipt_date(material_id)
            .map_err(data_access)?;
        let last_consumption = self
            .reader
            .last_consumption_date(material_id)
            .map_err(data_access)?;
        Ok((last_receipt, last_consumption))
    }

    /// Full enriched view of one material (active or not).
    #[instrument(level = "debug", skip(self))]
    pub fn enrich(&self, material_id: MaterialId) -> StockResult<EnrichedMaterial> {
        let material = self.require_material(material_id)?;
        let totals = LedgerTotals::read(&self.reader, material_id).map_err(data_access)?;
        Ok(EnrichedMaterial::from_parts(material, totals))
    }

    /// One enrichment pass over all active materials.
    #[instrument(level = "debug", skip(self))]
    pub fn fleet(&self) -> StockResult<FleetView> {
        let materials = self
            .reader
            .list_active_materials(None)
            .map_err(data_access)?;
        let fleet = FleetView::build(&self.reader, materials).map_err(data_access)?;
        debug!(materials = fleet.len(), "fleet enriched");
        Ok(fleet)
    }

    /// Active materials in `low` or `critical` status.
    pub fn low_stock_materials(&self) -> StockResult<Vec<EnrichedMaterial>> {
        Ok(self.fleet()?.low_stock())
    }

    pub fn dashboard_summary(&self) -> StockResult<DashboardSummary> {
        self.dashboard_summary_at(Utc::now())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn dashboard_summary_at(&self, as_of: DateTime<Utc>) -> StockResult<DashboardSummary> {
        let fleet = self.fleet()?;
        let since = window_start(as_of, self.policy.recent_window_days);

        let activity = ActivityCounts {
            pending_purchase_orders: self
                .reader
                .count_pending_purchase_orders()
                .map_err(data_access)?,
            recent_receipts: self.reader.receipts_since(since).map_err(data_access)?.len(),
            recent_consumptions: self
                .reader
                .consumptions_since(since)
                .map_err(data_access)?
                .len(),
        };

        Ok(DashboardSummary::compile(
            &fleet,
            activity,
            self.policy.recent_window_days,
        ))
    }

    pub fn stock_status_overview(&self) -> StockResult<StockStatusOverview> {
        Ok(self.fleet()?.status_overview())
    }

    pub fn consumption_trend(&self, days: i64) -> StockResult<ConsumptionTrend> {
        self.consumption_trend_at(days, Utc::now())
    }

    /// Trend over the policy's default window.
    pub fn default_consumption_trend(&self) -> StockResult<ConsumptionTrend> {
        self.consumption_trend(self.policy.default_trend_days)
    }

    /// Daily receipt and consumption totals since `as_of - days`.
    #[instrument(level = "debug", skip(self))]
    pub fn consumption_trend_at(
        &self,
        days: i64,
        as_of: DateTime<Utc>,
    ) -> StockResult<ConsumptionTrend> {
        ensure_window("days", days)?;
        let since = window_start(as_of, days);

        let consumptions = self.reader.consumptions_since(since).map_err(data_access)?;
        let receipts = self.reader.receipts_since(since).map_err(data_access)?;

        Ok(ConsumptionTrend {
            days,
            consumption: daily_series(&consumptions),
            receipts: daily_series(&receipts),
        })
    }

    pub fn recommendations(&self) -> StockResult<Recommendations> {
        Ok(self.fleet()?.recommendations())
    }

    pub fn material_statistics(&self) -> StockResult<MaterialStatistics> {
        Ok(self.fleet()?.material_statistics())
    }

    pub fn daily_report(&self) -> StockResult<DailyReport> {
        self.daily_report_at(Utc::now())
    }

    /// Stock rollup of every active item, dated `as_of`.
    #[instrument(level = "debug", skip(self))]
    pub fn daily_report_at(&self, as_of: DateTime<Utc>) -> StockResult<DailyReport> {
        let report = self.fleet()?.daily_report(as_of);
        debug!(materials = report.total_materials, "daily report compiled");
        Ok(report)
    }

    /// Text body for the low-stock notification; `None` when nothing is low.
    pub fn low_stock_digest(&self) -> StockResult<Option<String>> {
        let low_stock = self.low_stock_materials()?;
        Ok(low_stock_digest(&low_stock))
    }

    fn require_material(&self, material_id: MaterialId) -> StockResult<Material> {
        match self.reader.get_material(material_id).map_err(data_access)? {
            Some(material) => Ok(material),
            None => {
                debug!(%material_id, "material not found");
                Err(StockError::NotFound(material_id))
            }
        }
    }

    fn stock_of(&self, material: &Material) -> StockResult<f64> {
        let receipts = self.reader.sum_receipts(material.id).map_err(data_access)?;
        let consumptions = self
            .reader
            .sum_consumptions(material.id)
            .map_err(data_access)?;
        Ok(current_stock(material.opening_stock, receipts, consumptions))
    }
}

/// Start of a trailing window. Saturates instead of overflowing for absurd
/// windows.
fn window_start(as_of: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|window| as_of.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn data_access(err: LedgerError) -> StockError {
    warn!(error = %err, "ledger read failed");
    StockError::DataAccess(err)
}
