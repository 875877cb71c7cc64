//! Threshold tables as ordinary data.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BandError {
    #[error("band bound must be finite (got {0})")]
    NonFinite(f64),

    #[error("band bounds must be strictly increasing ({lower} then {upper})")]
    NotIncreasing { lower: f64, upper: f64 },

    #[error("{name} thresholds must lie in [{min}, {max}] (got {lower}, {upper})")]
    OutOfRange {
        name: &'static str,
        min: f64,
        max: f64,
        lower: f64,
        upper: f64,
    },
}

/// One closed-above band: values `<= upper_bound` fall into `category`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Band<C> {
    pub upper_bound: f64,
    pub category: C,
}

/// Ordered band list with an open-ended last category.
///
/// `classify` walks the bands in order and returns the first category whose
/// upper bound is not exceeded; anything above every bound is `otherwise`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bands<C> {
    bands: Vec<Band<C>>,
    otherwise: C,
}

impl<C: Copy> Bands<C> {
    /// Build a band list. Bounds must be finite and strictly increasing.
    pub fn new(bands: Vec<Band<C>>, otherwise: C) -> Result<Self, BandError> {
        if let Some(b) = bands.iter().find(|b| !b.upper_bound.is_finite()) {
            return Err(BandError::NonFinite(b.upper_bound));
        }
        for pair in bands.windows(2) {
            if pair[1].upper_bound <= pair[0].upper_bound {
                return Err(BandError::NotIncreasing {
                    lower: pair[0].upper_bound,
                    upper: pair[1].upper_bound,
                });
            }
        }
        Ok(Self { bands, otherwise })
    }

    pub fn classify(&self, value: f64) -> C {
        self.bands
            .iter()
            .find(|b| value <= b.upper_bound)
            .map(|b| b.category)
            .unwrap_or(self.otherwise)
    }

    pub fn bands(&self) -> &[Band<C>] {
        &self.bands
    }
}
