//! Raw numeric cells of the input tables.

use core::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use stockmatrix_core::{DomainError, DomainResult};

/// A numeric column value as delivered: either a number, or the text that
/// stood in its place.
///
/// Decoding never fails on a bad value; the text is kept so row validation
/// can reject the record and name what it saw.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericCell {
    Number(f64),
    Text(String),
}

impl NumericCell {
    /// The cell as a number. Text is accepted when it parses as one.
    pub fn to_f64(&self, field: &str) -> DomainResult<f64> {
        match self {
            NumericCell::Number(v) => Ok(*v),
            NumericCell::Text(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|_| DomainError::validation(format!("{field} is not a number (got '{raw}')"))),
        }
    }
}

impl From<f64> for NumericCell {
    fn from(value: f64) -> Self {
        NumericCell::Number(value)
    }
}

impl Serialize for NumericCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NumericCell::Number(v) => serializer.serialize_f64(*v),
            NumericCell::Text(raw) => serializer.serialize_str(raw),
        }
    }
}

struct CellVisitor;

impl Visitor<'_> for CellVisitor {
    type Value = NumericCell;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or text")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(NumericCell::Number(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(NumericCell::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(NumericCell::Number(v as f64))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
        Ok(NumericCell::Number(v as f64))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
        Ok(NumericCell::Number(v as f64))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(NumericCell::Text(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(NumericCell::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(NumericCell::Text(v))
    }
}

impl<'de> Deserialize<'de> for NumericCell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CellVisitor)
    }
}

/// A required numeric field.
pub(crate) fn required_number(cell: &Option<NumericCell>, field: &str) -> DomainResult<f64> {
    match cell {
        Some(c) => c.to_f64(field),
        None => Err(DomainError::validation(format!("missing required field: {field}"))),
    }
}

/// An optional numeric field; absent means `default`.
pub(crate) fn optional_number(cell: &Option<NumericCell>, field: &str, default: f64) -> DomainResult<f64> {
    match cell {
        Some(c) => c.to_f64(field),
        None => Ok(default),
    }
}
