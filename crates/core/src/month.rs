//! Calendar-month bucket used to key demand series.

use chrono::{Datelike, NaiveDate};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A (year, month) bucket. Every transaction date normalizes to exactly one.
///
/// Field order matters: derived `Ord` sorts chronologically.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> DomainResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::invalid_date(format!(
                "month must be in 1..=12 (got {month})"
            )));
        }
        Ok(Self { year, month })
    }

    /// Bucket containing `date`.
    pub fn of<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Months since year 0; consecutive months differ by exactly 1.
    pub fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month - 1)
    }

    fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }

    /// Shift by `delta` months (negative moves back in time).
    pub fn add_months(self, delta: i64) -> Self {
        Self::from_ordinal(self.ordinal() + delta)
    }

    /// Signed distance in months from `earlier` to `self`.
    pub fn months_since(&self, earlier: Month) -> i64 {
        self.ordinal() - earlier.ordinal()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Last calendar day of the month.
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.add_months(1).first_day()?.pred_opt()
    }

    /// The `len` months ending at (and including) `self`, oldest first.
    pub fn window_ending(self, len: usize) -> Vec<Month> {
        let len = len as i64;
        (0..len).map(|i| self.add_months(i - (len - 1))).collect()
    }
}

impl core::fmt::Display for Month {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| DomainError::invalid_date(format!("expected YYYY-MM (got {s:?})")))?;
        let year = y
            .parse::<i32>()
            .map_err(|e| DomainError::invalid_date(format!("year {y:?}: {e}")))?;
        let month = m
            .parse::<u32>()
            .map_err(|e| DomainError::invalid_date(format!("month {m:?}: {e}")))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for Month {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(value: Month) -> Self {
        value.to_string()
    }
}
