//! Analysis configuration.
//!
//! Every threshold and cost knob lives here as plain data. A config is
//! validated once before a run; a malformed config aborts the run before any
//! record is processed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::abc::{AbcCategory, AbcThresholds};
use crate::bands::{BandError, Bands};
use crate::lmh::{LmhCategory, LmhThresholds};
use crate::nine_box::{NineBoxCode, TierTable, ZScoreSource};

/// Upper bound on the analysis window (100 years of monthly buckets).
pub const MAX_WINDOW_MONTHS: usize = 1200;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),

    #[error("window_months must be at least 1")]
    EmptyWindow,

    #[error("window_months must be at most 1200 (got {0})")]
    WindowTooLarge(usize),

    #[error("invalid threshold: {0}")]
    Threshold(#[from] BandError),

    #[error("invalid cost setting: {0}")]
    Cost(String),

    #[error("nine-box code {0} is not assigned to any service tier")]
    UncoveredCode(NineBoxCode),

    #[error("nine-box code {code} appears in tier {first} and tier {second}")]
    DuplicateCode { code: NineBoxCode, first: u8, second: u8 },

    #[error("service tier {0} is defined more than once")]
    DuplicateTier(u8),

    #[error("service tier {tier}: service level must be in (0, 1) (got {value})")]
    InvalidServiceLevel { tier: u8, value: f64 },

    #[error("service tier {tier}: z-score must be finite and non-negative (got {value})")]
    InvalidZScore { tier: u8, value: f64 },

    #[error("fallback tier {0} does not exist")]
    UnknownFallbackTier(u8),
}

/// Tunable inputs of one analysis run.
///
/// Deserializes from partial JSON: absent fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of calendar months in the analysis window (ending at as-of).
    pub window_months: usize,
    pub abc: AbcThresholds,
    pub lmh: LmhThresholds,
    pub service_tiers: TierTable,
    pub z_source: ZScoreSource,
    /// Cost of placing one order.
    pub ordering_cost: f64,
    /// Annual holding cost as a fraction of unit cost.
    pub holding_rate: f64,
    /// Minimum transactions in the window for a trusted VOD (0 disables).
    pub min_transactions: usize,
    /// Raise order quantities to the part's minimum order quantity.
    pub enforce_min_order_qty: bool,
    /// Abort on the first malformed input record.
    pub strict: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_months: 36,
            abc: AbcThresholds::default(),
            lmh: LmhThresholds::default(),
            service_tiers: TierTable::default(),
            z_source: ZScoreSource::Table,
            ordering_cost: 50.0,
            holding_rate: 0.2,
            min_transactions: 3,
            enforce_min_order_qty: false,
            strict: false,
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_window_months(mut self, window_months: usize) -> Self {
        self.window_months = window_months;
        self
    }

    pub fn with_ordering_cost(mut self, ordering_cost: f64) -> Self {
        self.ordering_cost = ordering_cost;
        self
    }

    pub fn with_holding_rate(mut self, holding_rate: f64) -> Self {
        self.holding_rate = holding_rate;
        self
    }

    pub fn with_min_transactions(mut self, min_transactions: usize) -> Self {
        self.min_transactions = min_transactions;
        self
    }

    pub fn with_z_source(mut self, z_source: ZScoreSource) -> Self {
        self.z_source = z_source;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_enforce_min_order_qty(mut self, enforce: bool) -> Self {
        self.enforce_min_order_qty = enforce;
        self
    }

    pub fn abc_bands(&self) -> Result<Bands<AbcCategory>, ConfigError> {
        Ok(self.abc.bands()?)
    }

    pub fn lmh_bands(&self) -> Result<Bands<LmhCategory>, ConfigError> {
        Ok(self.lmh.bands()?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_months == 0 {
            return Err(ConfigError::EmptyWindow);
        }
        if self.window_months > MAX_WINDOW_MONTHS {
            return Err(ConfigError::WindowTooLarge(self.window_months));
        }
        self.abc_bands()?;
        self.lmh_bands()?;
        if !(self.ordering_cost.is_finite() && self.ordering_cost >= 0.0) {
            return Err(ConfigError::Cost(format!(
                "ordering_cost must be finite and non-negative (got {})",
                self.ordering_cost
            )));
        }
        if !(self.holding_rate.is_finite() && self.holding_rate > 0.0) {
            return Err(ConfigError::Cost(format!(
                "holding_rate must be finite and positive (got {})",
                self.holding_rate
            )));
        }
        self.service_tiers.validate(self.z_source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AnalysisConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.window_months, 36);
        assert_eq!(cfg.abc.a_threshold, 75.0);
        assert_eq!(cfg.abc.b_threshold, 95.0);
        assert_eq!(cfg.lmh.l_threshold, 1.0);
        assert_eq!(cfg.lmh.m_threshold, 2.0);
        assert_eq!(cfg.ordering_cost, 50.0);
        assert_eq!(cfg.holding_rate, 0.2);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = AnalysisConfig::from_json_str(
            r#"{"window_months": 24, "abc": {"a_threshold": 80}, "z_source": "inverse_normal"}"#,
        )
        .unwrap();
        assert_eq!(cfg.window_months, 24);
        assert_eq!(cfg.abc.a_threshold, 80.0);
        assert_eq!(cfg.abc.b_threshold, 95.0);
        assert_eq!(cfg.z_source, ZScoreSource::InverseNormal);
        assert_eq!(cfg.service_tiers, TierTable::default());
    }

    #[test]
    fn custom_tier_table_from_json() {
        let raw = r#"{
            "service_tiers": {
                "fallback_tier": 2,
                "tiers": [
                    {"tier": 1, "codes": ["AL","AM","AH","BL","BM"], "service_level": 0.98, "z_score": 2.05},
                    {"tier": 2, "codes": ["BH","CL","CM","CH"], "service_level": 0.9, "z_score": 1.28}
                ]
            }
        }"#;
        let cfg = AnalysisConfig::from_json_str(raw).unwrap();
        assert_eq!(cfg.service_tiers.tiers.len(), 2);
        assert_eq!(cfg.service_tiers.fallback_tier, 2);
    }

    #[test]
    fn tier_table_missing_a_code_is_fatal() {
        let raw = r#"{
            "service_tiers": {
                "fallback_tier": 1,
                "tiers": [
                    {"tier": 1, "codes": ["AL","AM","AH","BL","BM","BH","CL","CM"], "service_level": 0.95, "z_score": 1.64}
                ]
            }
        }"#;
        let err = AnalysisConfig::from_json_str(raw).unwrap_err();
        assert_eq!(err, ConfigError::UncoveredCode("CH".parse().unwrap()));
        assert_eq!(
            err.to_string(),
            "nine-box code CH is not assigned to any service tier"
        );
    }

    #[test]
    fn unknown_code_in_json_is_a_parse_error() {
        let raw = r#"{"service_tiers": {"fallback_tier": 1, "tiers": [{"tier": 1, "codes": ["XX"], "service_level": 0.9, "z_score": 1.28}]}}"#;
        assert!(matches!(
            AnalysisConfig::from_json_str(raw),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn rejects_bad_scalars() {
        assert_eq!(
            AnalysisConfig::default().with_window_months(0).validate(),
            Err(ConfigError::EmptyWindow)
        );
        assert!(matches!(
            AnalysisConfig::default().with_holding_rate(0.0).validate(),
            Err(ConfigError::Cost(_))
        ));
        assert!(matches!(
            AnalysisConfig::default().with_ordering_cost(-1.0).validate(),
            Err(ConfigError::Cost(_))
        ));
        let mut cfg = AnalysisConfig::default();
        cfg.lmh.m_threshold = 0.5;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::Threshold(BandError::NotIncreasing {
                lower: 1.0,
                upper: 0.5
            }))
        );
    }

    #[test]
    fn window_is_bounded() {
        assert_eq!(
            AnalysisConfig::default()
                .with_window_months(MAX_WINDOW_MONTHS)
                .validate(),
            Ok(())
        );
        assert_eq!(
            AnalysisConfig::default()
                .with_window_months(MAX_WINDOW_MONTHS + 1)
                .validate(),
            Err(ConfigError::WindowTooLarge(MAX_WINDOW_MONTHS + 1))
        );
        let err = AnalysisConfig::from_json_str(r#"{"window_months": 4611686018427387904}"#).unwrap_err();
        assert_eq!(err, ConfigError::WindowTooLarge(4_611_686_018_427_387_904));
    }
}
