//! Expense form validation.
//!
//! Validation is a pure function of the candidate record. It never renders
//! anything itself: every rule that applies contributes a tagged
//! [`Diagnostic`] and the presentation layer decides how to show them.
//!
//! Rules are evaluated independently, so one submission can collect
//! several diagnostics.

use shared::{Diagnostic, DiagnosticField, ValidationOutcome};

use crate::domain::models::expense::ExpenseRecord;

pub const ZERO_COST_MESSAGE: &str = "Cost cannot be zero";
pub const MISSING_LOCATION_MESSAGE: &str = "You must enter a location";
pub const MISSING_COMMENT_MESSAGE: &str = "A comment is recommended";

/// Validate a candidate expense.
///
/// The expense is accepted when its cost is strictly positive and its
/// location is non-empty. A negative cost is rejected without a message of
/// its own; only an exactly-zero cost gets the cost error. An empty comment
/// produces a warning that never blocks acceptance.
pub fn validate_expense(record: &ExpenseRecord) -> ValidationOutcome {
    let mut diagnostics = Vec::new();

    if record.cost == 0.0 {
        diagnostics.push(Diagnostic::error(DiagnosticField::Cost, ZERO_COST_MESSAGE));
    }

    if record.location.is_empty() {
        diagnostics.push(Diagnostic::error(
            DiagnosticField::Location,
            MISSING_LOCATION_MESSAGE,
        ));
    }

    if record.comment.is_empty() {
        diagnostics.push(Diagnostic::warning(
            DiagnosticField::Comment,
            MISSING_COMMENT_MESSAGE,
        ));
    }

    ValidationOutcome {
        accepted: record.cost > 0.0 && !record.location.is_empty(),
        diagnostics,
    }
}
