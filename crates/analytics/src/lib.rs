//! `stockmatrix-analytics`
//!
//! **Responsibility:** the inventory-policy engine.
//!
//! - Aggregates transactions into monthly demand series.
//! - Classifies parts by value (ABC) and demand variability (LMH).
//! - Maps the nine-box code to a service tier.
//! - Derives safety stock, reorder point and EOQ, then a replenishment action.
//!
//! The crate performs no IO and holds no state between runs: every run is a
//! pure function of its input snapshot and configuration.

pub mod abc;
pub mod action;
pub mod aggregate;
pub mod bands;
pub mod config;
pub mod job;
pub mod lmh;
pub mod nine_box;
pub mod outcome;
pub mod pipeline;
pub mod policy;
pub mod report;
pub mod stats;
pub mod summary;

pub use abc::{AbcCategory, AbcClassifier, AbcRecord, AbcThresholds};
pub use action::{Action, ActionRecommendation, StockSnapshot, evaluate_action};
pub use aggregate::{Aggregation, AnalysisWindow, PartActivity, aggregate};
pub use bands::{Band, Bands};
pub use config::{AnalysisConfig, ConfigError};
pub use job::AnalysisJob;
pub use lmh::{LmhCategory, LmhClassifier, LmhRecord, LmhThresholds, Vod};
pub use nine_box::{NineBoxCode, NineBoxRecord, ServiceAssignment, ServiceTier, TierTable, ZScoreSource};
pub use outcome::{Boundary, Derived};
pub use pipeline::{
    ClassificationInput, ClassificationJob, ClassificationReport, PartClassification, PolicyInput, PolicyJob,
};
pub use policy::{PolicyError, PolicyInputs, PolicyParameters, compute_policy};
pub use report::{AnalysisError, PartReport, PartStatus, PolicyReport, StockPosition};
pub use summary::PortfolioSummary;
