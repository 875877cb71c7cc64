use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use stockmatrix_core::{DomainError, DomainResult, Month, PartId};

use crate::cell::{NumericCell, required_number};

/// One consumption/sales transaction. Immutable input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub part_id: PartId,
    pub date: NaiveDate,
    /// Units consumed (never negative).
    pub quantity: f64,
    /// Price or cost per unit at the time of the transaction.
    pub unit_price: f64,
}

impl Transaction {
    pub fn new(part_id: PartId, date: NaiveDate, quantity: f64, unit_price: f64) -> DomainResult<Self> {
        DomainError::ensure_non_negative("quantity", quantity)?;
        DomainError::ensure_non_negative("unit_price", unit_price)?;
        Ok(Self {
            part_id,
            date,
            quantity,
            unit_price,
        })
    }

    /// Consumption value (quantity × unit price).
    pub fn value(&self) -> f64 {
        self.quantity * self.unit_price
    }

    pub fn month(&self) -> Month {
        Month::of(&self.date)
    }
}

/// Loosely typed transaction row as delivered by an external table.
///
/// Every field is optional so that a missing column surfaces as a per-record
/// input error instead of failing the whole load. Column aliases accept the
/// legacy export headers (`PartNum`, `Date`, `TotalDemand`, `UnitPrice`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    #[serde(default, alias = "PartNum")]
    pub part_id: Option<String>,
    #[serde(default, alias = "Date")]
    pub date: Option<String>,
    #[serde(default, alias = "TotalDemand")]
    pub quantity: Option<NumericCell>,
    #[serde(default, alias = "UnitPrice")]
    pub unit_price: Option<NumericCell>,
}

impl TransactionRow {
    pub fn new(part_id: &str, date: &str, quantity: f64, unit_price: f64) -> Self {
        Self {
            part_id: Some(part_id.to_string()),
            date: Some(date.to_string()),
            quantity: Some(quantity.into()),
            unit_price: Some(unit_price.into()),
        }
    }

    /// Validate into a typed [`Transaction`].
    pub fn validate(&self) -> DomainResult<Transaction> {
        let part_id = PartId::parse(required(&self.part_id, "part_id")?)?;
        let date = parse_date(required(&self.date, "date")?)?;
        let quantity = required_number(&self.quantity, "quantity")?;
        let unit_price = required_number(&self.unit_price, "unit_price")?;
        Transaction::new(part_id, date, quantity, unit_price)
    }
}

fn required<'a>(field: &'a Option<String>, name: &str) -> DomainResult<&'a str> {
    match field.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DomainError::validation(format!("missing required field: {name}"))),
    }
}

/// Parse a transaction date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, naive date-times (space or `T`
/// separated, optional fractional seconds) and RFC 3339 timestamps. Only the
/// calendar date is kept.
pub fn parse_date(raw: &str) -> DomainResult<NaiveDate> {
    let raw = raw.trim();
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Ok(d);
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    Err(DomainError::invalid_date(format!("unparseable date {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_builds_transaction() {
        let row = TransactionRow::new("SP-1", "2024-03-15", 4.0, 2.5);
        let tx = row.validate().unwrap();
        assert_eq!(tx.part_id.as_str(), "SP-1");
        assert_eq!(tx.month(), Month::new(2024, 3).unwrap());
        assert_eq!(tx.value(), 10.0);
    }

    #[test]
    fn validate_reports_missing_fields() {
        let mut row = TransactionRow::new("SP-1", "2024-03-15", 4.0, 2.5);
        row.unit_price = None;
        let err = row.validate().unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("missing required field: unit_price")
        );

        let mut row = TransactionRow::new("SP-1", "2024-03-15", 4.0, 2.5);
        row.part_id = Some("  ".to_string());
        assert!(matches!(row.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validate_rejects_negative_quantity() {
        let row = TransactionRow::new("SP-1", "2024-03-15", -1.0, 2.5);
        assert!(matches!(row.validate(), Err(DomainError::OutOfRange(_))));
    }

    #[test]
    fn parse_date_accepts_common_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        for raw in [
            "2024-01-31",
            "2024/01/31",
            "2024-01-31 23:59:59",
            "2024-01-31 23:59:59.999999999",
            "2024-01-31T08:00:00",
            "2024-01-31T08:00:00+02:00",
        ] {
            assert_eq!(parse_date(raw).unwrap(), expected, "layout {raw}");
        }
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("31st of Jan"),
            Err(DomainError::InvalidDate(_))
        ));
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn row_deserializes_legacy_headers() {
        let row: TransactionRow = serde_json::from_str(
            r#"{"PartNum":"SP-9","Date":"2024-05-31","TotalDemand":3,"UnitPrice":1.5}"#,
        )
        .unwrap();
        assert_eq!(row, TransactionRow::new("SP-9", "2024-05-31", 3.0, 1.5));
    }
}
