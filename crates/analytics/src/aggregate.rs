//! Reduce transactions into per-part monthly demand series and value totals.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use stockmatrix_core::{Month, PartId};
use stockmatrix_inventory::Transaction;

/// The calendar months an analysis covers: `months` buckets ending at the
/// as-of month (inclusive).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisWindow {
    pub start: Month,
    pub end: Month,
    pub months: usize,
}

impl AnalysisWindow {
    pub fn ending_at(as_of: NaiveDate, months: usize) -> Self {
        let end = Month::of(&as_of);
        Self {
            start: end.add_months(1 - months as i64),
            end,
            months,
        }
    }

    /// Position of `month` in the window, if it falls inside.
    pub fn index_of(&self, month: Month) -> Option<usize> {
        let offset = month.months_since(self.start);
        if offset >= 0 && (offset as usize) < self.months {
            Some(offset as usize)
        } else {
            None
        }
    }

    pub fn contains(&self, month: Month) -> bool {
        self.index_of(month).is_some()
    }
}

/// Aggregated window activity of one part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartActivity {
    pub part_id: PartId,
    /// Monthly demand, oldest first, exactly `window.months` long.
    pub series: Vec<f64>,
    /// Σ quantity × unit price inside the window.
    pub total_value: f64,
    pub transaction_count: usize,
}

/// Aggregation result, parts ordered by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub window: AnalysisWindow,
    pub parts: Vec<PartActivity>,
    /// Transactions dated outside the window.
    pub skipped: usize,
}

impl Aggregation {
    pub fn totals(&self) -> Vec<(PartId, f64)> {
        self.parts
            .iter()
            .map(|p| (p.part_id.clone(), p.total_value))
            .collect()
    }
}

/// Bucket transactions by part and month. Parts without any transaction in
/// the window do not appear; every part that does gets a zero-filled,
/// full-length series.
pub fn aggregate<'a, I>(transactions: I, window: AnalysisWindow) -> Aggregation
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut by_part: BTreeMap<PartId, PartActivity> = BTreeMap::new();
    let mut skipped = 0;

    for tx in transactions {
        let Some(idx) = window.index_of(tx.month()) else {
            skipped += 1;
            continue;
        };
        let entry = by_part
            .entry(tx.part_id.clone())
            .or_insert_with(|| PartActivity {
                part_id: tx.part_id.clone(),
                series: vec![0.0; window.months],
                total_value: 0.0,
                transaction_count: 0,
            });
        entry.series[idx] += tx.quantity;
        entry.total_value += tx.value();
        entry.transaction_count += 1;
    }

    Aggregation {
        window,
        parts: by_part.into_values().collect(),
        skipped,
    }
}
