//! Partial-failure tolerant ingestion of the two input tables.

use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use stockmatrix_core::{DomainError, PartId};

use crate::item::{InventoryRecord, InventoryRow};
use crate::transaction::{Transaction, TransactionRow};

/// Which input table a record came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Transactions,
    Inventory,
}

impl core::fmt::Display for Table {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Table::Transactions => f.write_str("transactions"),
            Table::Inventory => f.write_str("inventory"),
        }
    }
}

/// A rejected input record. Reported per record; other records still load.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{table} row {row}{}: {reason}", part_suffix(.part_id))]
pub struct InputError {
    pub table: Table,
    /// Zero-based position of the record in its input table.
    pub row: usize,
    /// Raw part identifier when one was present on the record.
    pub part_id: Option<String>,
    pub reason: String,
}

fn part_suffix(part_id: &Option<String>) -> String {
    match part_id {
        Some(p) => format!(" (part {p})"),
        None => String::new(),
    }
}

impl InputError {
    fn from_domain(table: Table, row: usize, part_id: Option<&str>, err: DomainError) -> Self {
        Self {
            table,
            row,
            part_id: part_id.map(str::to_string),
            reason: err.to_string(),
        }
    }
}

/// Records that passed validation plus the ones that did not.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested<T> {
    pub records: Vec<T>,
    pub rejected: Vec<InputError>,
}

impl<T> Ingested<T> {
    /// Strict mode: the first rejected record fails the whole load.
    pub fn into_strict(self) -> Result<Vec<T>, InputError> {
        match self.rejected.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.records),
        }
    }
}

/// Validate transaction rows, keeping input order.
pub fn ingest_transactions<'a, I>(rows: I) -> Ingested<Transaction>
where
    I: IntoIterator<Item = &'a TransactionRow>,
{
    let mut records = Vec::new();
    let mut rejected = Vec::new();
    for (idx, row) in rows.into_iter().enumerate() {
        match row.validate() {
            Ok(tx) => records.push(tx),
            Err(e) => rejected.push(InputError::from_domain(
                Table::Transactions,
                idx,
                row.part_id.as_deref(),
                e,
            )),
        }
    }
    Ingested { records, rejected }
}

/// Validate inventory rows. A part listed twice keeps its first record; the
/// duplicates are rejected.
pub fn ingest_inventory<'a, I>(rows: I) -> Ingested<InventoryRecord>
where
    I: IntoIterator<Item = &'a InventoryRow>,
{
    let mut seen: BTreeSet<PartId> = BTreeSet::new();
    let mut records = Vec::new();
    let mut rejected = Vec::new();
    for (idx, row) in rows.into_iter().enumerate() {
        let result = row.validate().and_then(|rec| {
            if seen.contains(&rec.part_id) {
                Err(DomainError::validation(format!(
                    "duplicate inventory record for part {}",
                    rec.part_id
                )))
            } else {
                Ok(rec)
            }
        });
        match result {
            Ok(rec) => {
                seen.insert(rec.part_id.clone());
                records.push(rec);
            }
            Err(e) => rejected.push(InputError::from_domain(
                Table::Inventory,
                idx,
                row.part_id.as_deref(),
                e,
            )),
        }
    }
    Ingested { records, rejected }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_rows_are_reported_and_good_rows_kept() {
        let rows = vec![
            TransactionRow::new("SP-1", "2024-01-10", 3.0, 2.0),
            TransactionRow::new("SP-2", "not-a-date", 3.0, 2.0),
            TransactionRow::new("SP-3", "2024-01-10", -1.0, 2.0),
            TransactionRow::new("SP-4", "2024-01-11", 1.0, 2.0),
        ];
        let out = ingest_transactions(&rows);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.rejected.len(), 2);
        assert_eq!(out.rejected[0].row, 1);
        assert_eq!(out.rejected[0].part_id.as_deref(), Some("SP-2"));
        assert_eq!(out.rejected[1].row, 2);
    }

    #[test]
    fn duplicate_inventory_rows_keep_first() {
        let rows = vec![
            InventoryRow::new("SP-1", 5.0, 2.0, 30.0),
            InventoryRow::new("SP-1", 9.0, 2.0, 30.0),
        ];
        let out = ingest_inventory(&rows);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].on_hand, 5.0);
        assert_eq!(out.rejected.len(), 1);
        assert!(out.rejected[0].reason.contains("duplicate"));
        assert_eq!(out.rejected[0].table, Table::Inventory);
    }

    #[test]
    fn into_strict_fails_on_first_rejection() {
        let rows = vec![
            TransactionRow::new("SP-1", "2024-01-10", 3.0, 2.0),
            TransactionRow::default(),
        ];
        let err = ingest_transactions(&rows).into_strict().unwrap_err();
        assert_eq!(err.row, 1);
        assert_eq!(err.part_id, None);
        assert_eq!(
            err.to_string(),
            "transactions row 1: validation failed: missing required field: part_id"
        );
    }

    #[test]
    fn into_strict_passes_clean_input() {
        let rows = vec![InventoryRow::new("SP-1", 5.0, 2.0, 30.0)];
        let records = ingest_inventory(&rows).into_strict().unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn error_message_names_the_part() {
        let rows = vec![InventoryRow::new("SP-7", 5.0, -2.0, 30.0)];
        let out = ingest_inventory(&rows);
        let msg = out.rejected[0].to_string();
        assert!(msg.starts_with("inventory row 0 (part SP-7): out of range:"), "{msg}");
    }
}
