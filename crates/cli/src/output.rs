//! Report writers.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use stockmatrix_analytics::{PartReport, PolicyReport};

use crate::cli::OutputFormat;

/// Flat CSV projection of a [`PartReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvRow {
    pub part_id: String,
    pub description: Option<String>,
    pub abc: Option<String>,
    pub lmh: Option<String>,
    pub nine_box: Option<String>,
    pub tier: u8,
    pub service_level: f64,
    pub z_score: f64,
    pub total_value: f64,
    pub cumulative_pct: Option<f64>,
    pub mean_monthly_demand: f64,
    pub std_monthly_demand: f64,
    pub vod: Option<f64>,
    pub on_hand: Option<f64>,
    pub on_order: Option<f64>,
    pub inventory_position: Option<f64>,
    pub safety_stock: Option<f64>,
    pub reorder_point: Option<f64>,
    pub eoq: Option<f64>,
    pub action: Option<String>,
    pub quantity: Option<f64>,
    pub financial_impact: Option<f64>,
    pub boundaries: String,
    pub status: String,
    pub error: Option<String>,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

impl From<&PartReport> for CsvRow {
    fn from(row: &PartReport) -> Self {
        let r2 = |v: Option<f64>| v.map(round2);
        Self {
            part_id: row.part_id.to_string(),
            description: row.description.clone(),
            abc: row.abc.map(|c| c.to_string()),
            lmh: row.lmh.map(|c| c.to_string()),
            nine_box: row.nine_box.map(|c| c.to_string()),
            tier: row.tier,
            service_level: row.service_level,
            z_score: row.z_score,
            total_value: round2(row.total_value),
            cumulative_pct: r2(row.cumulative_pct),
            mean_monthly_demand: round2(row.mean_monthly_demand),
            std_monthly_demand: round2(row.std_monthly_demand),
            vod: r2(row.vod.and_then(|v| v.value())),
            on_hand: r2(row.stock.map(|s| s.on_hand)),
            on_order: r2(row.stock.map(|s| s.on_order)),
            inventory_position: r2(row.stock.map(|s| s.inventory_position)),
            safety_stock: r2(row.safety_stock()),
            reorder_point: r2(row.reorder_point()),
            eoq: r2(row.eoq()),
            action: row.recommendation.map(|r| r.action.to_string()),
            quantity: r2(row.recommendation.map(|r| r.quantity)),
            financial_impact: r2(row.recommendation.map(|r| r.financial_impact)),
            boundaries: row
                .boundaries
                .iter()
                .map(|b| b.as_str())
                .collect::<Vec<_>>()
                .join(";"),
            status: row.status.as_str().to_string(),
            error: row.error.clone(),
        }
    }
}

pub fn write_csv<W: Write>(report: &PolicyReport, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in &report.rows {
        writer
            .serialize(CsvRow::from(row))
            .with_context(|| format!("failed to write row for {}", row.part_id))?;
    }
    writer.flush().context("failed to flush CSV output")?;
    Ok(())
}

pub fn write_json<W: Write>(report: &PolicyReport, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, report).context("failed to serialize report")?;
    writeln!(out)?;
    Ok(())
}

pub fn write_report<W: Write>(report: &PolicyReport, format: OutputFormat, out: W) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(report, out),
        OutputFormat::Csv => write_csv(report, out),
    }
}
