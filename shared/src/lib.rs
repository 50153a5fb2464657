use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single grocery expense as returned to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Calendar date of the purchase, always at midnight
    pub date: NaiveDateTime,
    /// Cost rounded to two decimal places
    pub cost: f64,
    pub location: String,
    pub comment: String,
    /// Whether the charge was applied to a gift card
    pub gift: bool,
}

/// Raw form input for a new expense, exactly as the user entered it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseFormInput {
    /// Chosen calendar date - uses today if not provided
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub gift: bool,
}

/// Initial values and limits for the expense form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseFormDefaults {
    pub date: NaiveDate,
    /// Latest date the date picker allows
    pub max_date: NaiveDate,
    pub cost: f64,
    /// Increment used by the cost input
    pub cost_step: f64,
    pub location: String,
    pub comment: String,
    pub gift: bool,
}

/// Form field a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticField {
    Cost,
    Location,
    Comment,
    /// The expense as a whole (persistence outcome)
    Record,
}

/// Severity of a diagnostic, used for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A user-facing message tagged with its field and severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub field: DiagnosticField,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn error(field: DiagnosticField, message: impl Into<String>) -> Self {
        Self {
            field,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(field: DiagnosticField, message: impl Into<String>) -> Self {
        Self {
            field,
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn info(field: DiagnosticField, message: impl Into<String>) -> Self {
        Self {
            field,
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Result of validating a candidate expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub accepted: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of submitting the expense form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    /// Whether validation accepted the expense
    pub accepted: bool,
    /// Whether `expenses` holds a dataset re-read after the insert
    pub dataset_refreshed: bool,
    pub diagnostics: Vec<Diagnostic>,
    pub expenses: Option<Vec<Expense>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
    pub count: usize,
}

/// An expense formatted for table display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedExpense {
    pub formatted_date: String,
    pub formatted_cost: String,
    pub location: String,
    pub comment: String,
    pub gift_label: String,
    pub raw_date: NaiveDateTime,
    pub raw_cost: f64,
    pub gift: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseTableResponse {
    pub rows: Vec<FormattedExpense>,
}

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Spend totals over a set of expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingTotals {
    pub total: f64,
    /// Portion of `total` charged to gift cards
    pub gift_total: f64,
    pub formatted_total: String,
    pub formatted_gift_total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSummaryResponse {
    pub range: DateRange,
    pub range_totals: SpendingTotals,
    pub overall_totals: SpendingTotals,
    /// Expenses whose date falls within `range`
    pub rows: Vec<Expense>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub cost: f64,
}

/// Cost over date, ordered by date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeriesResponse {
    pub points: Vec<ChartPoint>,
}
