//! Nine-box composition and the service-level tier table.

use core::str::FromStr;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use stockmatrix_core::PartId;

use crate::abc::AbcCategory;
use crate::config::ConfigError;
use crate::lmh::LmhCategory;
use crate::stats::inverse_normal_cdf;

/// One of the nine ABC×LMH codes (`AL` … `CH`).
///
/// Always valid by construction; "unclassified" is modelled as the absence of
/// a code (`Option<NineBoxCode>`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NineBoxCode {
    pub abc: AbcCategory,
    pub lmh: LmhCategory,
}

impl NineBoxCode {
    pub fn new(abc: AbcCategory, lmh: LmhCategory) -> Self {
        Self { abc, lmh }
    }

    /// All nine codes in matrix order.
    pub fn all() -> Vec<NineBoxCode> {
        let mut out = Vec::with_capacity(9);
        for abc in [AbcCategory::A, AbcCategory::B, AbcCategory::C] {
            for lmh in [LmhCategory::L, LmhCategory::M, LmhCategory::H] {
                out.push(NineBoxCode::new(abc, lmh));
            }
        }
        out
    }
}

/// Compose a code; a missing half leaves the part unclassified.
pub fn compose(abc: Option<AbcCategory>, lmh: Option<LmhCategory>) -> Option<NineBoxCode> {
    Some(NineBoxCode::new(abc?, lmh?))
}

impl core::fmt::Display for NineBoxCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}", self.abc, self.lmh)
    }
}

impl FromStr for NineBoxCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(a), Some(l), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(format!("nine-box code must be two letters (got {s:?})"));
        };
        let abc = match a.to_ascii_uppercase() {
            'A' => AbcCategory::A,
            'B' => AbcCategory::B,
            'C' => AbcCategory::C,
            other => return Err(format!("unknown ABC category {other:?} in {s:?}")),
        };
        let lmh = match l.to_ascii_uppercase() {
            'L' => LmhCategory::L,
            'M' => LmhCategory::M,
            'H' => LmhCategory::H,
            other => return Err(format!("unknown LMH category {other:?} in {s:?}")),
        };
        Ok(Self::new(abc, lmh))
    }
}

impl TryFrom<String> for NineBoxCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NineBoxCode> for String {
    fn from(value: NineBoxCode) -> Self {
        value.to_string()
    }
}

/// Where Z-scores come from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZScoreSource {
    /// The literal Z column of the tier table.
    #[default]
    Table,
    /// Inverse normal CDF of the tier's service level.
    InverseNormal,
}

/// One service-level tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceTier {
    pub tier: u8,
    pub codes: Vec<NineBoxCode>,
    pub service_level: f64,
    pub z_score: f64,
}

/// Code → tier lookup. Business-overridable data, not logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierTable {
    pub tiers: Vec<ServiceTier>,
    /// Tier applied to unclassified parts.
    pub fallback_tier: u8,
}

impl Default for TierTable {
    fn default() -> Self {
        fn codes(list: &[&str]) -> Vec<NineBoxCode> {
            list.iter().filter_map(|c| c.parse().ok()).collect()
        }
        Self {
            tiers: vec![
                ServiceTier {
                    tier: 1,
                    codes: codes(&["AL", "AM"]),
                    service_level: 0.99,
                    z_score: 2.33,
                },
                ServiceTier {
                    tier: 2,
                    codes: codes(&["BL", "BM"]),
                    service_level: 0.97,
                    z_score: 1.88,
                },
                ServiceTier {
                    tier: 3,
                    codes: codes(&["CL", "CM", "AH", "BH"]),
                    service_level: 0.95,
                    z_score: 1.64,
                },
                ServiceTier {
                    tier: 4,
                    codes: codes(&["CH"]),
                    service_level: 0.90,
                    z_score: 1.28,
                },
            ],
            fallback_tier: 4,
        }
    }
}

/// Resolved service target for one part.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ServiceAssignment {
    pub tier: u8,
    pub service_level: f64,
    pub z_score: f64,
}

impl TierTable {
    /// Reject tables that would silently fall through for some codes: every
    /// code must appear in exactly one tier, and every tier must be usable.
    pub fn validate(&self, source: ZScoreSource) -> Result<(), ConfigError> {
        let mut tier_numbers = BTreeSet::new();
        let mut owner: BTreeMap<NineBoxCode, u8> = BTreeMap::new();

        for t in &self.tiers {
            if !tier_numbers.insert(t.tier) {
                return Err(ConfigError::DuplicateTier(t.tier));
            }
            if !(t.service_level > 0.0 && t.service_level < 1.0) {
                return Err(ConfigError::InvalidServiceLevel {
                    tier: t.tier,
                    value: t.service_level,
                });
            }
            let z = match source {
                ZScoreSource::Table => t.z_score,
                ZScoreSource::InverseNormal => inverse_normal_cdf(t.service_level).unwrap_or(f64::NAN),
            };
            if !(z.is_finite() && z >= 0.0) {
                return Err(ConfigError::InvalidZScore {
                    tier: t.tier,
                    value: z,
                });
            }
            for code in &t.codes {
                if let Some(first) = owner.insert(*code, t.tier) {
                    return Err(ConfigError::DuplicateCode {
                        code: *code,
                        first,
                        second: t.tier,
                    });
                }
            }
        }

        if let Some(missing) = NineBoxCode::all().into_iter().find(|c| !owner.contains_key(c)) {
            return Err(ConfigError::UncoveredCode(missing));
        }
        if !tier_numbers.contains(&self.fallback_tier) {
            return Err(ConfigError::UnknownFallbackTier(self.fallback_tier));
        }
        Ok(())
    }

    fn tier_for(&self, code: Option<NineBoxCode>) -> Option<&ServiceTier> {
        code.and_then(|c| self.tiers.iter().find(|t| t.codes.contains(&c)))
            .or_else(|| self.tiers.iter().find(|t| t.tier == self.fallback_tier))
    }

    /// Service level and Z for a code. Unclassified or unmatched codes take
    /// the fallback tier; a table that lacks even that (never the case after
    /// `validate`) degrades to the standard 90% target.
    pub fn resolve(&self, code: Option<NineBoxCode>, source: ZScoreSource) -> ServiceAssignment {
        let Some(t) = self.tier_for(code) else {
            return ServiceAssignment {
                tier: self.fallback_tier,
                service_level: 0.90,
                z_score: 1.28,
            };
        };
        let z_score = match source {
            ZScoreSource::Table => t.z_score,
            ZScoreSource::InverseNormal => inverse_normal_cdf(t.service_level).unwrap_or(t.z_score),
        };
        ServiceAssignment {
            tier: t.tier,
            service_level: t.service_level,
            z_score,
        }
    }
}

/// Classification of one part across both axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NineBoxRecord {
    pub part_id: PartId,
    pub abc: Option<AbcCategory>,
    pub lmh: Option<LmhCategory>,
    pub code: Option<NineBoxCode>,
    pub tier: u8,
    pub service_level: f64,
    pub z_score: f64,
}

impl NineBoxRecord {
    pub fn compose(
        part_id: PartId,
        abc: Option<AbcCategory>,
        lmh: Option<LmhCategory>,
        table: &TierTable,
        source: ZScoreSource,
    ) -> Self {
        let code = compose(abc, lmh);
        let ServiceAssignment {
            tier,
            service_level,
            z_score,
        } = table.resolve(code, source);
        Self {
            part_id,
            abc,
            lmh,
            code,
            tier,
            service_level,
            z_score,
        }
    }
}
