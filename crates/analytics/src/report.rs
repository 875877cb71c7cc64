use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use stockmatrix_core::PartId;
use stockmatrix_inventory::InputError;

use crate::abc::AbcCategory;
use crate::action::ActionRecommendation;
use crate::aggregate::AnalysisWindow;
use crate::config::ConfigError;
use crate::lmh::{LmhCategory, Vod};
use crate::nine_box::NineBoxCode;
use crate::outcome::Boundary;
use crate::policy::PolicyParameters;
use crate::summary::PortfolioSummary;

/// Per-part processing outcome.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartStatus {
    /// Every value was computed directly.
    Ok,
    /// At least one fallback policy was applied (see `boundaries`).
    Boundary,
    /// The policy could not be computed for this part (see `error`).
    Error,
}

impl PartStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartStatus::Ok => "ok",
            PartStatus::Boundary => "boundary",
            PartStatus::Error => "error",
        }
    }
}

/// Inventory state the policy was computed against.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct StockPosition {
    pub on_hand: f64,
    pub on_order: f64,
    pub inventory_position: f64,
    pub unit_cost: f64,
    /// on hand × unit cost.
    pub on_hand_value: f64,
    pub lead_time_months: f64,
    pub min_order_qty: f64,
    pub holding_cost_per_unit: f64,
}

/// One row of the output table.
///
/// This is an insight, not a stored entity: it is recomputed from scratch on
/// every run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartReport {
    pub part_id: PartId,
    pub description: Option<String>,

    pub abc: Option<AbcCategory>,
    pub lmh: Option<LmhCategory>,
    pub nine_box: Option<NineBoxCode>,
    pub tier: u8,
    pub service_level: f64,
    pub z_score: f64,

    pub total_value: f64,
    pub cumulative_pct: Option<f64>,
    pub transaction_count: usize,
    pub mean_monthly_demand: f64,
    pub std_monthly_demand: f64,
    pub vod: Option<Vod>,

    pub stock: Option<StockPosition>,
    pub policy: Option<PolicyParameters>,
    pub recommendation: Option<ActionRecommendation>,

    pub boundaries: Vec<Boundary>,
    pub status: PartStatus,
    pub error: Option<String>,
}

impl PartReport {
    pub fn safety_stock(&self) -> Option<f64> {
        self.policy.map(|p| p.safety_stock)
    }

    pub fn reorder_point(&self) -> Option<f64> {
        self.policy.map(|p| p.reorder_point)
    }

    pub fn eoq(&self) -> Option<f64> {
        self.policy.map(|p| p.eoq.value())
    }

    pub fn has_boundary(&self, boundary: Boundary) -> bool {
        self.boundaries.contains(&boundary)
    }
}

/// Output of a full policy run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyReport {
    pub as_of: NaiveDate,
    pub window: AnalysisWindow,
    /// One row per part, ordered by part id.
    pub rows: Vec<PartReport>,
    /// Input records that failed validation (lenient mode only).
    pub rejected: Vec<InputError>,
    /// Valid transactions dated outside the window.
    pub skipped_transactions: usize,
    pub summary: PortfolioSummary,
}

impl PolicyReport {
    pub fn row(&self, part_id: &str) -> Option<&PartReport> {
        self.rows
            .binary_search_by(|r| r.part_id.as_str().cmp(part_id))
            .ok()
            .map(|idx| &self.rows[idx])
    }
}

/// Errors that abort a whole run. Per-part problems never do; they are
/// reported on the row instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("strict mode rejected input: {0}")]
    Input(#[from] InputError),
}
