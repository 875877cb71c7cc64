//! LMH (demand variability) classification via the coefficient of variation.

use serde::{Deserialize, Serialize};

use stockmatrix_core::PartId;

use crate::bands::{Band, BandError, Bands};
use crate::outcome::Boundary;
use crate::stats::{mean, stddev_sample};

/// Variability class of a part.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LmhCategory {
    L,
    M,
    H,
}

impl LmhCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LmhCategory::L => "L",
            LmhCategory::M => "M",
            LmhCategory::H => "H",
        }
    }
}

impl core::fmt::Display for LmhCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// VOD cutoffs (inclusive upper bounds of L and M).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LmhThresholds {
    pub l_threshold: f64,
    pub m_threshold: f64,
}

impl Default for LmhThresholds {
    fn default() -> Self {
        Self {
            l_threshold: 1.0,
            m_threshold: 2.0,
        }
    }
}

impl LmhThresholds {
    pub fn bands(&self) -> Result<Bands<LmhCategory>, BandError> {
        if self.l_threshold < 0.0 {
            return Err(BandError::OutOfRange {
                name: "LMH",
                min: 0.0,
                max: f64::INFINITY,
                lower: self.l_threshold,
                upper: self.m_threshold,
            });
        }
        Bands::new(
            vec![
                Band {
                    upper_bound: self.l_threshold,
                    category: LmhCategory::L,
                },
                Band {
                    upper_bound: self.m_threshold,
                    category: LmhCategory::M,
                },
            ],
            LmhCategory::H,
        )
    }
}

/// Coefficient of variation (std / mean) of a demand series.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Vod {
    Defined(f64),
    /// Mean demand was zero.
    Undefined,
}

impl Vod {
    pub fn compute(std_dev: f64, mean: f64) -> Self {
        if mean > 0.0 {
            Vod::Defined(std_dev / mean)
        } else {
            Vod::Undefined
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Vod::Defined(v) => Some(*v),
            Vod::Undefined => None,
        }
    }
}

/// Variability record of one part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LmhRecord {
    pub part_id: PartId,
    pub mean: f64,
    pub std_dev: f64,
    pub vod: Vod,
    pub category: LmhCategory,
    pub boundaries: Vec<Boundary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LmhClassifier {
    bands: Bands<LmhCategory>,
    min_transactions: usize,
}

impl LmhClassifier {
    pub fn new(bands: Bands<LmhCategory>) -> Self {
        Self {
            bands,
            min_transactions: 0,
        }
    }

    /// Parts with fewer transactions than this in the window are forced to H.
    pub fn with_min_transactions(mut self, min_transactions: usize) -> Self {
        self.min_transactions = min_transactions;
        self
    }

    /// Classify one part from its zero-filled monthly series.
    pub fn classify(&self, part_id: &PartId, series: &[f64], transaction_count: usize) -> LmhRecord {
        let mean = mean(series);
        let std_dev = stddev_sample(series, mean);
        let vod = Vod::compute(std_dev, mean);

        let mut boundaries = Vec::new();
        let mut category = match vod {
            Vod::Defined(v) => self.bands.classify(v),
            Vod::Undefined => {
                boundaries.push(Boundary::ZeroMeanDemand);
                LmhCategory::H
            }
        };
        if transaction_count < self.min_transactions {
            boundaries.push(Boundary::InsufficientHistory);
            category = LmhCategory::H;
        }

        LmhRecord {
            part_id: part_id.clone(),
            mean,
            std_dev,
            vod,
            category,
            boundaries,
        }
    }
}
