use serde::{Deserialize, Serialize};

use stockmatrix_core::{DomainError, DomainResult, PartId};

use crate::cell::{NumericCell, optional_number, required_number};

/// Days per planning month when converting lead times (60 days = 2.0 months).
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Current inventory state for one part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub part_id: PartId,
    pub description: Option<String>,
    pub on_hand: f64,
    pub unit_cost: f64,
    pub lead_time_days: f64,
    pub min_order_qty: f64,
    /// Open purchase-order quantity not yet received.
    pub on_order: f64,
}

impl InventoryRecord {
    pub fn new(part_id: PartId, on_hand: f64, unit_cost: f64, lead_time_days: f64) -> DomainResult<Self> {
        DomainError::ensure_non_negative("on_hand", on_hand)?;
        DomainError::ensure_non_negative("unit_cost", unit_cost)?;
        DomainError::ensure_non_negative("lead_time_days", lead_time_days)?;
        Ok(Self {
            part_id,
            description: None,
            on_hand,
            unit_cost,
            lead_time_days,
            min_order_qty: 0.0,
            on_order: 0.0,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_min_order_qty(mut self, min_order_qty: f64) -> DomainResult<Self> {
        self.min_order_qty = DomainError::ensure_non_negative("min_order_qty", min_order_qty)?;
        Ok(self)
    }

    pub fn with_on_order(mut self, on_order: f64) -> DomainResult<Self> {
        self.on_order = DomainError::ensure_non_negative("on_order", on_order)?;
        Ok(self)
    }

    /// Stock available to cover demand: on hand plus open orders.
    pub fn inventory_position(&self) -> f64 {
        self.on_hand + self.on_order
    }

    pub fn lead_time_months(&self) -> f64 {
        self.lead_time_days / DAYS_PER_MONTH
    }

    pub fn on_hand_value(&self) -> f64 {
        self.on_hand * self.unit_cost
    }
}

/// Loosely typed inventory row as delivered by an external table.
///
/// `min_order_qty` and `on_order` default to zero when absent; every other
/// field is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryRow {
    #[serde(default, alias = "PartNum")]
    pub part_id: Option<String>,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
    #[serde(default, alias = "OnHandQty")]
    pub on_hand: Option<NumericCell>,
    #[serde(default, alias = "UnitCost")]
    pub unit_cost: Option<NumericCell>,
    #[serde(default, alias = "LeadTimeDays")]
    pub lead_time_days: Option<NumericCell>,
    #[serde(default, alias = "MinOrderQty")]
    pub min_order_qty: Option<NumericCell>,
    #[serde(default, alias = "TotalPOQty")]
    pub on_order: Option<NumericCell>,
}

impl InventoryRow {
    pub fn new(part_id: &str, on_hand: f64, unit_cost: f64, lead_time_days: f64) -> Self {
        Self {
            part_id: Some(part_id.to_string()),
            on_hand: Some(on_hand.into()),
            unit_cost: Some(unit_cost.into()),
            lead_time_days: Some(lead_time_days.into()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> DomainResult<InventoryRecord> {
        let part_id = match self.part_id.as_deref() {
            Some(raw) if !raw.trim().is_empty() => PartId::parse(raw)?,
            _ => return Err(DomainError::validation("missing required field: part_id")),
        };
        let on_hand = required_number(&self.on_hand, "on_hand")?;
        let unit_cost = required_number(&self.unit_cost, "unit_cost")?;
        let lead_time_days = required_number(&self.lead_time_days, "lead_time_days")?;

        let mut record = InventoryRecord::new(part_id, on_hand, unit_cost, lead_time_days)?
            .with_min_order_qty(optional_number(&self.min_order_qty, "min_order_qty", 0.0)?)?
            .with_on_order(optional_number(&self.on_order, "on_order", 0.0)?)?;
        if let Some(desc) = self.description.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            record = record.with_description(desc);
        }
        Ok(record)
    }
}
