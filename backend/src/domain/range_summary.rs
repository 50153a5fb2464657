//! Date-range aggregation over the expense dataset.
//!
//! The dataset is fetched whole and filtered here by calendar date, then
//! summed into a total and the portion charged to gift cards.

use chrono::{Datelike, Months, NaiveDate};
use shared::{DateRange, Expense, RangeSummaryResponse, SpendingTotals};
use thiserror::Error;

use crate::domain::money::{format_currency, sum_to_cents};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("range start {start} is after range end {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}

/// The calendar month containing `today`, first through last day
pub fn default_range(today: NaiveDate) -> DateRange {
    let start = today.with_day(1).unwrap_or(today);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next_month| next_month.pred_opt())
        .unwrap_or(start);

    DateRange { start, end }
}

/// Fill in whichever bound is missing from the month containing `today`
pub fn resolve_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<DateRange, RangeError> {
    let fallback = default_range(today);
    let range = DateRange {
        start: start.unwrap_or(fallback.start),
        end: end.unwrap_or(fallback.end),
    };

    if range.start > range.end {
        return Err(RangeError::StartAfterEnd {
            start: range.start,
            end: range.end,
        });
    }
    Ok(range)
}

/// Expenses whose calendar date lies within the inclusive range
pub fn filter_by_range(expenses: &[Expense], range: &DateRange) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| {
            let date = expense.date.date();
            date >= range.start && date <= range.end
        })
        .cloned()
        .collect()
}

pub fn spending_totals(expenses: &[Expense]) -> SpendingTotals {
    let total = sum_to_cents(expenses.iter().map(|e| e.cost));
    let gift_total = sum_to_cents(expenses.iter().filter(|e| e.gift).map(|e| e.cost));

    SpendingTotals {
        total,
        gift_total,
        formatted_total: format_currency(total),
        formatted_gift_total: format_currency(gift_total),
    }
}

/// Totals for the range and for the whole dataset, plus the rows in range
pub fn summarize(expenses: &[Expense], range: DateRange) -> RangeSummaryResponse {
    let rows = filter_by_range(expenses, &range);

    RangeSummaryResponse {
        range,
        range_totals: spending_totals(&rows),
        overall_totals: spending_totals(expenses),
        rows,
    }
}
