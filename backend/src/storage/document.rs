//! # Expense Documents
//!
//! Encoding of expense records as JSON documents.
//!
//! Writes always use one canonical layout:
//!
//! ```json
//! {"date": "2024-03-01T00:00:00", "cost": 12.35, "location": "Market", "comment": "", "gift": false}
//! ```
//!
//! Reads are tolerant about the `date` field, which older or foreign writers
//! may have stored as an RFC 3339 string, a naive timestamp string, a bare
//! `YYYY-MM-DD` string, epoch milliseconds, or an extended-JSON native date
//! object such as `{"$date": "2024-03-01T00:00:00Z"}` or `{"$date": 1709251200000}`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::models::expense::ExpenseRecord;
use crate::domain::money::{is_whole_cents, to_decimal};

/// Reasons a document does not have the shape of an expense
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("cost must be a finite number, got {0}")]
    NonFiniteCost(f64),

    #[error("cost must not be negative, got {0}")]
    NegativeCost(f64),

    #[error("cost is too large to store, got {0}")]
    CostOutOfRange(f64),

    #[error("cost must have at most two decimal places, got {0}")]
    SubCentCost(f64),

    #[error("date must be at midnight, got {0}")]
    DateNotMidnight(NaiveDateTime),

    #[error("{0} must not have leading or trailing whitespace")]
    UntrimmedText(&'static str),

    #[error("unrecognized stored date: {0}")]
    UnrecognizedDate(String),
}

/// Canonical document written for every new expense
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseDocument {
    pub date: NaiveDateTime,
    pub cost: f64,
    pub location: String,
    pub comment: String,
    pub gift: bool,
}

impl ExpenseDocument {
    /// Check that the document matches the expected expense shape
    pub fn check_shape(&self) -> Result<(), ShapeError> {
        if !self.cost.is_finite() {
            return Err(ShapeError::NonFiniteCost(self.cost));
        }
        if self.cost < 0.0 {
            return Err(ShapeError::NegativeCost(self.cost));
        }
        if to_decimal(self.cost).is_none() {
            return Err(ShapeError::CostOutOfRange(self.cost));
        }
        if !is_whole_cents(self.cost) {
            return Err(ShapeError::SubCentCost(self.cost));
        }
        if self.date.time() != NaiveTime::MIN {
            return Err(ShapeError::DateNotMidnight(self.date));
        }
        if self.location.trim() != self.location {
            return Err(ShapeError::UntrimmedText("location"));
        }
        if self.comment.trim() != self.comment {
            return Err(ShapeError::UntrimmedText("comment"));
        }
        Ok(())
    }
}

impl From<&ExpenseRecord> for ExpenseDocument {
    fn from(record: &ExpenseRecord) -> Self {
        Self {
            date: record.date,
            cost: record.cost,
            location: record.location.clone(),
            comment: record.comment.clone(),
            gift: record.gift,
        }
    }
}

/// Date value as it may appear in a stored document
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StoredDate {
    Native {
        #[serde(rename = "$date")]
        value: NativeDate,
    },
    Millis(i64),
    Text(String),
}

/// Payload of an extended-JSON `{"$date": ...}` object
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NativeDate {
    Millis(i64),
    Text(String),
}

/// Document layout accepted on read
#[derive(Debug, Clone, Deserialize)]
pub struct StoredDocument {
    pub date: StoredDate,
    pub cost: f64,
    pub location: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub gift: bool,
}

impl StoredDocument {
    pub fn into_record(self) -> Result<ExpenseRecord, ShapeError> {
        Ok(ExpenseRecord {
            date: self.date.to_naive_datetime()?,
            cost: self.cost,
            location: self.location,
            comment: self.comment,
            gift: self.gift,
        })
    }
}

impl StoredDate {
    /// Convert any supported date encoding to a `NaiveDateTime`.
    /// Timezone-aware values are converted to UTC.
    pub fn to_naive_datetime(&self) -> Result<NaiveDateTime, ShapeError> {
        match self {
            StoredDate::Native { value: NativeDate::Millis(millis) } | StoredDate::Millis(millis) => {
                parse_epoch_millis(*millis)
            }
            StoredDate::Native { value: NativeDate::Text(text) } | StoredDate::Text(text) => {
                parse_date_text(text)
            }
        }
    }
}

fn parse_epoch_millis(millis: i64) -> Result<NaiveDateTime, ShapeError> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| ShapeError::UnrecognizedDate(millis.to_string()))
}

fn parse_date_text(text: &str) -> Result<NaiveDateTime, ShapeError> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(ShapeError::UnrecognizedDate(text.to_string()))
}
