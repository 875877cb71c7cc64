//! ABC (value) classification.
//!
//! This is the only stage that needs every part at once: the cumulative share
//! of a part depends on the totals of all parts ranked above it. It runs as an
//! explicit barrier step between aggregation and the per-part fan-out.

use serde::{Deserialize, Serialize};

use stockmatrix_core::PartId;

use crate::bands::{Band, BandError, Bands};
use crate::outcome::Boundary;

/// Value class of a part.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbcCategory {
    A,
    B,
    C,
}

impl AbcCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbcCategory::A => "A",
            AbcCategory::B => "B",
            AbcCategory::C => "C",
        }
    }
}

impl core::fmt::Display for AbcCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cumulative-percentage cutoffs (inclusive upper bounds of A and B).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbcThresholds {
    pub a_threshold: f64,
    pub b_threshold: f64,
}

impl Default for AbcThresholds {
    fn default() -> Self {
        Self {
            a_threshold: 75.0,
            b_threshold: 95.0,
        }
    }
}

impl AbcThresholds {
    /// Thresholds must lie in (0, 100].
    pub fn bands(&self) -> Result<Bands<AbcCategory>, BandError> {
        if !(self.a_threshold > 0.0 && self.b_threshold <= 100.0) {
            return Err(BandError::OutOfRange {
                name: "ABC",
                min: 0.0,
                max: 100.0,
                lower: self.a_threshold,
                upper: self.b_threshold,
            });
        }
        Bands::new(
            vec![
                Band {
                    upper_bound: self.a_threshold,
                    category: AbcCategory::A,
                },
                Band {
                    upper_bound: self.b_threshold,
                    category: AbcCategory::B,
                },
            ],
            AbcCategory::C,
        )
    }
}

/// Value record of one part after ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbcRecord {
    pub part_id: PartId,
    /// 1-based position in the value ranking.
    pub rank: usize,
    pub total_value: f64,
    pub cumulative_value: f64,
    pub cumulative_pct: f64,
    pub category: AbcCategory,
    pub boundary: Option<Boundary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AbcClassifier {
    bands: Bands<AbcCategory>,
}

impl AbcClassifier {
    pub fn new(bands: Bands<AbcCategory>) -> Self {
        Self { bands }
    }

    /// Rank parts by value (descending, ties by part id ascending) and assign
    /// categories from the running cumulative share.
    ///
    /// Records come back in rank order. A zero grand total puts every part in
    /// C and flags it.
    pub fn classify(&self, totals: Vec<(PartId, f64)>) -> Vec<AbcRecord> {
        let mut ranked = totals;
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let grand_total: f64 = ranked.iter().map(|(_, v)| *v).sum();
        let degenerate = grand_total <= 0.0;

        let mut cumulative = 0.0;
        ranked
            .into_iter()
            .enumerate()
            .map(|(idx, (part_id, total_value))| {
                cumulative += total_value;
                let (cumulative_pct, category, boundary) = if degenerate {
                    (0.0, AbcCategory::C, Some(Boundary::ZeroTotalValue))
                } else {
                    let pct = cumulative * 100.0 / grand_total;
                    (pct, self.bands.classify(pct), None)
                };
                AbcRecord {
                    part_id,
                    rank: idx + 1,
                    total_value,
                    cumulative_value: cumulative,
                    cumulative_pct,
                    category,
                    boundary,
                }
            })
            .collect()
    }
}
