//! Portfolio-level roll-up of a policy run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::action::Action;
use crate::report::PartReport;

const UNCLASSIFIED: &str = "unclassified";

/// Aggregate figures over all report rows.
///
/// Keys are strings so the maps serialize as plain JSON objects; ordered maps
/// keep the output deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PortfolioSummary {
    pub parts: usize,
    /// Σ on hand × unit cost.
    pub current_inventory_value: f64,
    /// Σ financial impact of `order` recommendations.
    pub orders_total: f64,
    /// Σ financial impact of `reduce_stock` recommendations.
    pub reduce_total: f64,
    /// current + orders − reductions.
    pub projected_inventory_value: f64,
    pub abc_counts: BTreeMap<String, usize>,
    pub nine_box_counts: BTreeMap<String, usize>,
    /// action → ABC category → count.
    pub action_counts: BTreeMap<String, BTreeMap<String, usize>>,
    pub status_counts: BTreeMap<String, usize>,
}

impl PortfolioSummary {
    pub fn from_rows(rows: &[PartReport]) -> Self {
        let mut s = PortfolioSummary {
            parts: rows.len(),
            ..Self::default()
        };

        for row in rows {
            let abc = row
                .abc
                .map(|c| c.as_str().to_string())
                .unwrap_or_else(|| UNCLASSIFIED.to_string());
            let code = row
                .nine_box
                .map(|c| c.to_string())
                .unwrap_or_else(|| UNCLASSIFIED.to_string());

            *s.abc_counts.entry(abc.clone()).or_default() += 1;
            *s.nine_box_counts.entry(code).or_default() += 1;
            *s.status_counts.entry(row.status.as_str().to_string()).or_default() += 1;

            if let Some(stock) = &row.stock {
                s.current_inventory_value += stock.on_hand_value;
            }
            if let Some(rec) = &row.recommendation {
                match rec.action {
                    Action::Order => s.orders_total += rec.financial_impact,
                    Action::ReduceStock => s.reduce_total += rec.financial_impact,
                    Action::NoAction => {}
                }
                *s.action_counts
                    .entry(rec.action.as_str().to_string())
                    .or_default()
                    .entry(abc)
                    .or_default() += 1;
            }
        }

        s.projected_inventory_value = s.current_inventory_value + s.orders_total - s.reduce_total;
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abc::AbcCategory;
    use crate::action::ActionRecommendation;
    use crate::lmh::LmhCategory;
    use crate::nine_box::NineBoxCode;
    use crate::report::{PartStatus, StockPosition};
    use stockmatrix_core::PartId;

    fn row(
        id: &str,
        abc: Option<AbcCategory>,
        on_hand: f64,
        unit_cost: f64,
        action: Option<(Action, f64)>,
    ) -> PartReport {
        PartReport {
            part_id: PartId::parse(id).unwrap(),
            description: None,
            abc,
            lmh: abc.map(|_| LmhCategory::L),
            nine_box: abc.map(|a| NineBoxCode::new(a, LmhCategory::L)),
            tier: 1,
            service_level: 0.99,
            z_score: 2.33,
            total_value: 0.0,
            cumulative_pct: None,
            transaction_count: 0,
            mean_monthly_demand: 0.0,
            std_monthly_demand: 0.0,
            vod: None,
            stock: Some(StockPosition {
                on_hand,
                on_order: 0.0,
                inventory_position: on_hand,
                unit_cost,
                on_hand_value: on_hand * unit_cost,
                lead_time_months: 1.0,
                min_order_qty: 0.0,
                holding_cost_per_unit: unit_cost * 0.2,
            }),
            policy: None,
            recommendation: action.map(|(action, quantity)| ActionRecommendation {
                action,
                quantity,
                financial_impact: quantity * unit_cost,
            }),
            boundaries: Vec::new(),
            status: PartStatus::Ok,
            error: None,
        }
    }

    #[test]
    fn rolls_up_values_and_counts() {
        let rows = vec![
            row("P1", Some(AbcCategory::A), 10.0, 2.0, Some((Action::Order, 5.0))),
            row("P2", Some(AbcCategory::A), 100.0, 1.0, Some((Action::ReduceStock, 40.0))),
            row("P3", Some(AbcCategory::C), 4.0, 5.0, Some((Action::NoAction, 0.0))),
            row("P4", None, 1.0, 1.0, Some((Action::ReduceStock, 1.0))),
        ];
        let s = PortfolioSummary::from_rows(&rows);
        assert_eq!(s.parts, 4);
        assert_eq!(s.current_inventory_value, 20.0 + 100.0 + 20.0 + 1.0);
        assert_eq!(s.orders_total, 10.0);
        assert_eq!(s.reduce_total, 41.0);
        assert_eq!(s.projected_inventory_value, 141.0 + 10.0 - 41.0);

        assert_eq!(s.abc_counts.get("A"), Some(&2));
        assert_eq!(s.abc_counts.get("C"), Some(&1));
        assert_eq!(s.abc_counts.get("unclassified"), Some(&1));
        assert_eq!(s.nine_box_counts.get("AL"), Some(&2));
        assert_eq!(s.nine_box_counts.get("unclassified"), Some(&1));
        assert_eq!(s.action_counts["reduce_stock"].get("A"), Some(&1));
        assert_eq!(s.action_counts["reduce_stock"].get("unclassified"), Some(&1));
        assert_eq!(s.action_counts["order"].get("A"), Some(&1));
        assert_eq!(s.status_counts.get("ok"), Some(&4));
    }

    #[test]
    fn empty_portfolio_is_all_zero() {
        let s = PortfolioSummary::from_rows(&[]);
        assert_eq!(s, PortfolioSummary::default());
    }
}
