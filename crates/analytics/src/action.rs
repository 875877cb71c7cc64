//! Point-in-time replenishment decision.

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Order,
    ReduceStock,
    NoAction,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Order => "order",
            Action::ReduceStock => "reduce_stock",
            Action::NoAction => "no_action",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot the decision is made on.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct StockSnapshot {
    /// Inventory position (on hand plus open orders).
    pub current_stock: f64,
    pub reorder_point: f64,
    pub eoq: f64,
    pub unit_cost: f64,
    pub min_order_qty: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ActionRecommendation {
    pub action: Action,
    pub quantity: f64,
    /// quantity × unit cost.
    pub financial_impact: f64,
}

/// Decide Order / ReduceStock / NoAction.
///
/// Evaluated in order: below the reorder point orders one EOQ; above
/// ROP + EOQ reduces the excess; everything else (including stock exactly at
/// the reorder point) is left alone. With `enforce_min_order_qty`, an order is
/// raised to the part's minimum order quantity.
pub fn evaluate_action(snapshot: &StockSnapshot, enforce_min_order_qty: bool) -> ActionRecommendation {
    let StockSnapshot {
        current_stock,
        reorder_point,
        eoq,
        unit_cost,
        min_order_qty,
    } = *snapshot;

    let (action, quantity) = if current_stock < reorder_point {
        let qty = if enforce_min_order_qty { eoq.max(min_order_qty) } else { eoq };
        (Action::Order, qty)
    } else if current_stock > reorder_point + eoq {
        (Action::ReduceStock, current_stock - (reorder_point + eoq))
    } else {
        (Action::NoAction, 0.0)
    };

    ActionRecommendation {
        action,
        quantity,
        financial_impact: quantity * unit_cost,
    }
}
