//! `stockmatrix-core`: shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no logging setup):
//! the error model, the part identifier, and the calendar-month bucket every
//! demand series is keyed by.

pub mod error;
pub mod id;
pub mod month;

pub use error::{DomainError, DomainResult};
pub use id::PartId;
pub use month::Month;
