//! Safety stock, reorder point and EOQ.

use serde::Serialize;
use thiserror::Error;

use crate::outcome::{Boundary, Derived};

/// Months per year when annualizing monthly demand.
pub const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    #[error("lead time cannot be negative (got {0} months)")]
    NegativeLeadTime(f64),

    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} cannot be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
}

/// Per-part inputs of the policy engine.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct PolicyInputs {
    pub z_score: f64,
    pub std_monthly: f64,
    pub mean_monthly: f64,
    /// Fractional months are allowed (60 days = 2.0).
    pub lead_time_months: f64,
    /// Cost of placing one order.
    pub ordering_cost: f64,
    /// Cost of holding one unit for a year.
    pub holding_cost_per_unit: f64,
}

/// Inventory control parameters, full precision.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct PolicyParameters {
    pub safety_stock: f64,
    pub reorder_point: f64,
    pub annual_demand: f64,
    pub eoq: Derived<f64>,
}

impl PolicyInputs {
    fn check(&self) -> Result<(), PolicyError> {
        let fields = [
            ("z_score", self.z_score),
            ("std_monthly", self.std_monthly),
            ("mean_monthly", self.mean_monthly),
            ("lead_time_months", self.lead_time_months),
            ("ordering_cost", self.ordering_cost),
            ("holding_cost_per_unit", self.holding_cost_per_unit),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(PolicyError::NonFinite { field, value });
            }
        }
        if self.lead_time_months < 0.0 {
            return Err(PolicyError::NegativeLeadTime(self.lead_time_months));
        }
        for (field, value) in [
            ("z_score", self.z_score),
            ("std_monthly", self.std_monthly),
            ("mean_monthly", self.mean_monthly),
            ("ordering_cost", self.ordering_cost),
        ] {
            if value < 0.0 {
                return Err(PolicyError::Negative { field, value });
            }
        }
        Ok(())
    }
}

/// SS = Z·σ·√LT, ROP = μ·LT + SS, EOQ = √(2·D·S / H) with D = 12·μ.
///
/// A non-positive holding cost leaves EOQ undefined; it falls back to 0 and
/// is flagged instead of producing Infinity/NaN.
pub fn compute_policy(inputs: &PolicyInputs) -> Result<PolicyParameters, PolicyError> {
    inputs.check()?;

    let safety_stock = inputs.z_score * inputs.std_monthly * inputs.lead_time_months.sqrt();
    let reorder_point = inputs.mean_monthly * inputs.lead_time_months + safety_stock;
    let annual_demand = inputs.mean_monthly * MONTHS_PER_YEAR;

    let eoq = if inputs.holding_cost_per_unit > 0.0 {
        Derived::computed(
            ((2.0 * annual_demand * inputs.ordering_cost) / inputs.holding_cost_per_unit).sqrt(),
        )
    } else {
        Derived::fallback(0.0, Boundary::NonPositiveHoldingCost)
    };

    Ok(PolicyParameters {
        safety_stock,
        reorder_point,
        annual_demand,
        eoq,
    })
}
