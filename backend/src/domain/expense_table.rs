//! Expense table display logic.
//!
//! Turns raw expenses into display rows for a table or grid. The raw date
//! and cost are kept alongside the formatted text for sorting on the client.

use chrono::NaiveDateTime;
use shared::{Expense, FormattedExpense};

use crate::domain::money::format_currency;

#[derive(Clone, Default)]
pub struct ExpenseTableService;

impl ExpenseTableService {
    pub fn new() -> Self {
        Self
    }

    /// Format a list of expenses for table display, preserving order
    pub fn format_expenses_for_table(&self, expenses: &[Expense]) -> Vec<FormattedExpense> {
        expenses
            .iter()
            .map(|expense| self.format_single_expense(expense))
            .collect()
    }

    pub fn format_single_expense(&self, expense: &Expense) -> FormattedExpense {
        FormattedExpense {
            formatted_date: self.format_date(&expense.date),
            formatted_cost: format_currency(expense.cost),
            location: expense.location.clone(),
            comment: expense.comment.clone(),
            gift_label: if expense.gift { "Yes" } else { "No" }.to_string(),
            raw_date: expense.date,
            raw_cost: expense.cost,
            gift: expense.gift,
        }
    }

    /// Calendar date in ISO form, e.g. `2024-03-01`
    pub fn format_date(&self, date: &NaiveDateTime) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_test_expense(date: (i32, u32, u32), cost: f64, location: &str, gift: bool) -> Expense {
        Expense {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            cost,
            location: location.to_string(),
            comment: "groceries".to_string(),
            gift,
        }
    }

    #[test]
    fn test_format_single_expense() {
        let service = ExpenseTableService::new();
        let expense = create_test_expense((2024, 3, 1), 12.35, "Market", true);

        let formatted = service.format_single_expense(&expense);

        assert_eq!(formatted.formatted_date, "2024-03-01");
        assert_eq!(formatted.formatted_cost, "$12.35");
        assert_eq!(formatted.location, "Market");
        assert_eq!(formatted.comment, "groceries");
        assert_eq!(formatted.gift_label, "Yes");
        assert_eq!(formatted.raw_cost, 12.35);
        assert!(formatted.gift);
    }

    #[test]
    fn test_sub_cent_cost_is_rounded_for_display() {
        let service = ExpenseTableService::new();
        let expense = create_test_expense((2024, 3, 1), 0.5, "Market", false);

        let formatted = service.format_single_expense(&expense);

        assert_eq!(formatted.formatted_cost, "$0.50");
        assert_eq!(formatted.gift_label, "No");
    }

    #[test]
    fn test_table_preserves_order() {
        let service = ExpenseTableService::new();
        let expenses = vec![
            create_test_expense((2024, 3, 5), 1.0, "Later", false),
            create_test_expense((2024, 3, 1), 2.0, "Earlier", false),
        ];

        let rows = service.format_expenses_for_table(&expenses);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].location, "Later");
        assert_eq!(rows[1].gift_label, "No");
    }
}
