//! Tagged outcomes for computations with undefined regions.
//!
//! Division-by-zero style boundaries never surface as NaN/Infinity; they are
//! resolved by a documented fallback and recorded as a [`Boundary`] flag.

use serde::Serialize;

/// A computation boundary that was resolved by a fallback policy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Total consumption value of all parts was zero; every part fell to C.
    ZeroTotalValue,
    /// Mean monthly demand was zero; VOD is undefined and the part is H.
    ZeroMeanDemand,
    /// Too few transactions in the window to trust the VOD; forced to H.
    InsufficientHistory,
    /// No transactions in the window at all; the part is unclassified.
    NoDemandHistory,
    /// Holding cost per unit was zero or negative; EOQ is undefined.
    NonPositiveHoldingCost,
    /// Part has demand history but no inventory record; no policy computed.
    MissingInventoryRecord,
}

impl Boundary {
    pub fn as_str(&self) -> &'static str {
        match self {
            Boundary::ZeroTotalValue => "zero_total_value",
            Boundary::ZeroMeanDemand => "zero_mean_demand",
            Boundary::InsufficientHistory => "insufficient_history",
            Boundary::NoDemandHistory => "no_demand_history",
            Boundary::NonPositiveHoldingCost => "non_positive_holding_cost",
            Boundary::MissingInventoryRecord => "missing_inventory_record",
        }
    }
}

impl core::fmt::Display for Boundary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value that was either computed or substituted by a fallback.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Derived<T> {
    Computed { value: T },
    Fallback { value: T, boundary: Boundary },
}

impl<T: Copy> Derived<T> {
    pub fn computed(value: T) -> Self {
        Derived::Computed { value }
    }

    pub fn fallback(value: T, boundary: Boundary) -> Self {
        Derived::Fallback { value, boundary }
    }

    /// The usable value, whichever way it was obtained.
    pub fn value(&self) -> T {
        match self {
            Derived::Computed { value } | Derived::Fallback { value, .. } => *value,
        }
    }

    pub fn boundary(&self) -> Option<Boundary> {
        match self {
            Derived::Computed { .. } => None,
            Derived::Fallback { boundary, .. } => Some(*boundary),
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Derived::Computed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_carries_value_and_boundary() {
        let d = Derived::fallback(0.0, Boundary::NonPositiveHoldingCost);
        assert_eq!(d.value(), 0.0);
        assert_eq!(d.boundary(), Some(Boundary::NonPositiveHoldingCost));
        assert!(!d.is_computed());

        let c = Derived::computed(4.5);
        assert_eq!(c.value(), 4.5);
        assert_eq!(c.boundary(), None);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(Derived::fallback(0.0, Boundary::NonPositiveHoldingCost)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "fallback", "value": 0.0, "boundary": "non_positive_holding_cost"})
        );
        let json = serde_json::to_value(Derived::computed(2.0)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "computed", "value": 2.0}));
    }
}
