//! CSV loading for the two input tables.
//!
//! Headers are matched by name (either the snake_case field names or the
//! PartNum / TotalDemand / OnHandQty style); extra columns are ignored.
//! Numeric columns are read as raw cells, so a value such as `n/a` survives
//! loading and is rejected per record by ingestion. Only a structurally
//! broken line (wrong column count, bad quoting) fails the load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use stockmatrix_analytics::AnalysisConfig;
use stockmatrix_inventory::{InventoryRow, TransactionRow};

pub fn read_rows<T, R>(reader: R) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: T = result.with_context(|| format!("CSV parse error at line {}", idx + 2))?;
        rows.push(row);
    }
    Ok(rows)
}

fn read_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;
    read_rows(file).with_context(|| format!("failed to read '{}'", path.display()))
}

pub fn load_transactions(path: &Path) -> Result<Vec<TransactionRow>> {
    read_file(path)
}

pub fn load_inventory(path: &Path) -> Result<Vec<InventoryRow>> {
    read_file(path)
}

/// Load a JSON config file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    AnalysisConfig::from_json_str(&raw).with_context(|| format!("invalid config '{}'", path.display()))
}
