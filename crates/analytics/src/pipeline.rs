//! The two-phase analysis run.
//!
//! Phase one aggregates every transaction in the window and ranks all parts
//! by value (ABC needs the grand total). After that barrier each part is
//! independent: LMH, nine-box, policy and action are computed per part and
//! gathered in part-id order.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use stockmatrix_core::PartId;
use stockmatrix_inventory::{
    InputError, InventoryRecord, InventoryRow, Transaction, TransactionRow, ingest_inventory,
    ingest_transactions,
};

use crate::abc::{AbcClassifier, AbcRecord};
use crate::action::{StockSnapshot, evaluate_action};
use crate::aggregate::{AnalysisWindow, aggregate};
use crate::config::{AnalysisConfig, ConfigError};
use crate::job::AnalysisJob;
use crate::lmh::{LmhClassifier, LmhRecord};
use crate::nine_box::NineBoxRecord;
use crate::outcome::Boundary;
use crate::policy::{PolicyInputs, compute_policy};
use crate::report::{AnalysisError, PartReport, PartStatus, PolicyReport, StockPosition};
use crate::summary::PortfolioSummary;

/// Validated transactions to classify.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationInput {
    pub as_of: NaiveDate,
    pub transactions: Vec<Transaction>,
}

/// Both classification axes of one part with window activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartClassification {
    pub part_id: PartId,
    pub transaction_count: usize,
    pub abc: AbcRecord,
    pub lmh: LmhRecord,
    pub nine_box: NineBoxRecord,
}

impl PartClassification {
    /// Boundaries raised while classifying, sorted and unique.
    pub fn boundaries(&self) -> Vec<Boundary> {
        let mut out: Vec<Boundary> = self.abc.boundary.into_iter().collect();
        out.extend(self.lmh.boundaries.iter().copied());
        out.sort();
        out.dedup();
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub as_of: NaiveDate,
    pub window: AnalysisWindow,
    /// Ordered by part id.
    pub parts: Vec<PartClassification>,
    pub skipped_transactions: usize,
}

impl ClassificationReport {
    pub fn part(&self, part_id: &str) -> Option<&PartClassification> {
        self.parts
            .binary_search_by(|p| p.part_id.as_str().cmp(part_id))
            .ok()
            .map(|idx| &self.parts[idx])
    }
}

/// Classify parts from their window activity: ABC, LMH and the nine-box tier.
#[derive(Debug, Clone)]
pub struct ClassificationJob {
    config: AnalysisConfig,
    input: ClassificationInput,
}

impl ClassificationJob {
    pub fn new(config: AnalysisConfig, input: ClassificationInput) -> Self {
        Self { config, input }
    }
}

impl AnalysisJob for ClassificationJob {
    type Input = ClassificationInput;
    type Output = ClassificationReport;

    fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    fn input(&self) -> &Self::Input {
        &self.input
    }

    fn run(&self) -> Result<Self::Output, AnalysisError> {
        self.config.validate()?;
        let classified = classify_window(&self.config, &self.input.transactions, self.input.as_of)?;
        Ok(ClassificationReport {
            as_of: self.input.as_of,
            window: classified.window,
            parts: classified.parts.into_values().collect(),
            skipped_transactions: classified.skipped,
        })
    }
}

/// Raw input tables of a policy run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolicyInput {
    pub as_of: NaiveDate,
    pub transactions: Vec<TransactionRow>,
    pub inventory: Vec<InventoryRow>,
}

/// Full run: ingest both tables, classify, then derive stocking policy and a
/// replenishment action for every part.
///
/// Malformed records are rejected individually and reported; with
/// `strict` set the first one aborts the run instead.
#[derive(Debug, Clone)]
pub struct PolicyJob {
    config: AnalysisConfig,
    input: PolicyInput,
}

impl PolicyJob {
    pub fn new(config: AnalysisConfig, input: PolicyInput) -> Self {
        Self { config, input }
    }
}

impl AnalysisJob for PolicyJob {
    type Input = PolicyInput;
    type Output = PolicyReport;

    fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    fn input(&self) -> &Self::Input {
        &self.input
    }

    fn run(&self) -> Result<Self::Output, AnalysisError> {
        self.config.validate()?;

        let tx = ingest_transactions(&self.input.transactions);
        let inv = ingest_inventory(&self.input.inventory);
        debug!(
            transactions = tx.records.len(),
            inventory = inv.records.len(),
            "input ingested"
        );

        let (transactions, inventory, rejected) = if self.config.strict {
            (tx.into_strict()?, inv.into_strict()?, Vec::new())
        } else {
            let mut rejected: Vec<InputError> = tx.rejected;
            rejected.extend(inv.rejected);
            for err in &rejected {
                warn!(table = %err.table, row = err.row, reason = %err.reason, "input record rejected");
            }
            (tx.records, inv.records, rejected)
        };

        let classified = classify_window(&self.config, &transactions, self.input.as_of)?;

        let stock: BTreeMap<PartId, InventoryRecord> = inventory
            .into_iter()
            .map(|item| (item.part_id.clone(), item))
            .collect();
        let universe: BTreeSet<&PartId> = classified.parts.keys().chain(stock.keys()).collect();

        let rows: Vec<PartReport> = universe
            .into_iter()
            .map(|part_id| {
                part_report(
                    &self.config,
                    part_id,
                    classified.parts.get(part_id),
                    stock.get(part_id),
                )
            })
            .collect();

        let summary = PortfolioSummary::from_rows(&rows);
        let boundary_rows = summary
            .status_counts
            .get(PartStatus::Boundary.as_str())
            .copied()
            .unwrap_or(0);
        if !rows.is_empty() && boundary_rows * 2 > rows.len() {
            warn!(
                boundary_rows,
                parts = rows.len(),
                "more than half of the parts needed a fallback"
            );
        }
        info!(
            as_of = %self.input.as_of,
            window_start = %classified.window.start,
            window_end = %classified.window.end,
            parts = rows.len(),
            rejected = rejected.len(),
            skipped = classified.skipped,
            "policy run completed"
        );

        Ok(PolicyReport {
            as_of: self.input.as_of,
            window: classified.window,
            rows,
            rejected,
            skipped_transactions: classified.skipped,
            summary,
        })
    }
}

struct Classified {
    window: AnalysisWindow,
    parts: BTreeMap<PartId, PartClassification>,
    skipped: usize,
}

fn classify_window(
    config: &AnalysisConfig,
    transactions: &[Transaction],
    as_of: NaiveDate,
) -> Result<Classified, ConfigError> {
    let abc = AbcClassifier::new(config.abc_bands()?);
    let lmh = LmhClassifier::new(config.lmh_bands()?).with_min_transactions(config.min_transactions);

    let window = AnalysisWindow::ending_at(as_of, config.window_months);
    let aggregation = aggregate(transactions, window);
    debug!(
        parts = aggregation.parts.len(),
        skipped = aggregation.skipped,
        "transactions aggregated"
    );

    // Barrier: ranking needs every part's total.
    let mut ranked: BTreeMap<PartId, AbcRecord> = abc
        .classify(aggregation.totals())
        .into_iter()
        .map(|r| (r.part_id.clone(), r))
        .collect();
    debug!(parts = ranked.len(), "abc ranking done");

    let mut parts = BTreeMap::new();
    for activity in aggregation.parts {
        let Some(abc_record) = ranked.remove(&activity.part_id) else {
            continue;
        };
        let lmh_record = lmh.classify(&activity.part_id, &activity.series, activity.transaction_count);
        let nine_box = NineBoxRecord::compose(
            activity.part_id.clone(),
            Some(abc_record.category),
            Some(lmh_record.category),
            &config.service_tiers,
            config.z_source,
        );
        parts.insert(
            activity.part_id.clone(),
            PartClassification {
                part_id: activity.part_id,
                transaction_count: activity.transaction_count,
                abc: abc_record,
                lmh: lmh_record,
                nine_box,
            },
        );
    }

    Ok(Classified {
        window,
        parts,
        skipped: aggregation.skipped,
    })
}

fn part_report(
    config: &AnalysisConfig,
    part_id: &PartId,
    classification: Option<&PartClassification>,
    item: Option<&InventoryRecord>,
) -> PartReport {
    let mut boundaries = Vec::new();

    let nine_box = match classification {
        Some(c) => {
            boundaries.extend(c.boundaries());
            c.nine_box.clone()
        }
        None => {
            boundaries.push(Boundary::NoDemandHistory);
            NineBoxRecord::compose(part_id.clone(), None, None, &config.service_tiers, config.z_source)
        }
    };
    let mean_monthly = classification.map_or(0.0, |c| c.lmh.mean);
    let std_monthly = classification.map_or(0.0, |c| c.lmh.std_dev);

    let mut stock = None;
    let mut policy = None;
    let mut recommendation = None;
    let mut error = None;

    match item {
        None => boundaries.push(Boundary::MissingInventoryRecord),
        Some(item) => {
            let position = StockPosition {
                on_hand: item.on_hand,
                on_order: item.on_order,
                inventory_position: item.inventory_position(),
                unit_cost: item.unit_cost,
                on_hand_value: item.on_hand_value(),
                lead_time_months: item.lead_time_months(),
                min_order_qty: item.min_order_qty,
                holding_cost_per_unit: item.unit_cost * config.holding_rate,
            };
            let inputs = PolicyInputs {
                z_score: nine_box.z_score,
                std_monthly,
                mean_monthly,
                lead_time_months: position.lead_time_months,
                ordering_cost: config.ordering_cost,
                holding_cost_per_unit: position.holding_cost_per_unit,
            };
            match compute_policy(&inputs) {
                Ok(params) => {
                    boundaries.extend(params.eoq.boundary());
                    recommendation = Some(evaluate_action(
                        &StockSnapshot {
                            current_stock: position.inventory_position,
                            reorder_point: params.reorder_point,
                            eoq: params.eoq.value(),
                            unit_cost: position.unit_cost,
                            min_order_qty: position.min_order_qty,
                        },
                        config.enforce_min_order_qty,
                    ));
                    policy = Some(params);
                }
                Err(e) => {
                    warn!(part_id = %part_id, error = %e, "policy computation failed");
                    error = Some(e.to_string());
                }
            }
            stock = Some(position);
        }
    }

    boundaries.sort();
    boundaries.dedup();
    let status = if error.is_some() {
        PartStatus::Error
    } else if boundaries.is_empty() {
        PartStatus::Ok
    } else {
        PartStatus::Boundary
    };

    PartReport {
        part_id: part_id.clone(),
        description: item.and_then(|i| i.description.clone()),
        abc: nine_box.abc,
        lmh: nine_box.lmh,
        nine_box: nine_box.code,
        tier: nine_box.tier,
        service_level: nine_box.service_level,
        z_score: nine_box.z_score,
        total_value: classification.map_or(0.0, |c| c.abc.total_value),
        cumulative_pct: classification.map(|c| c.abc.cumulative_pct),
        transaction_count: classification.map_or(0, |c| c.transaction_count),
        mean_monthly_demand: mean_monthly,
        std_monthly_demand: std_monthly,
        vod: classification.map(|c| c.lmh.vod),
        stock,
        policy,
        recommendation,
        boundaries,
        status,
        error,
    }
}
