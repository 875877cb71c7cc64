//! Inventory input tables.
//!
//! This crate owns the two tables the engine consumes (transaction history and
//! current inventory state) and the row-level validation that turns loosely
//! typed rows into records. Deterministic domain logic only (no IO).

pub mod cell;
pub mod ingest;
pub mod item;
pub mod transaction;

pub use cell::NumericCell;
pub use ingest::{Ingested, InputError, Table, ingest_inventory, ingest_transactions};
pub use item::{DAYS_PER_MONTH, InventoryRecord, InventoryRow};
pub use transaction::{Transaction, TransactionRow, parse_date};
