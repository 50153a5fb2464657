use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use shared::ExpenseFormInput;

use crate::domain::money::round_to_cents;

/// Domain representation of a grocery expense
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    /// Purchase date; records built from the form are always at midnight
    pub date: NaiveDateTime,
    pub cost: f64,
    pub location: String,
    pub comment: String,
    pub gift: bool,
}

impl ExpenseRecord {
    /// Assemble a candidate record from raw form input.
    ///
    /// Text fields are trimmed, the cost is rounded to cents and the chosen
    /// date (or `today` when none was picked) is combined with midnight.
    pub fn from_form(input: ExpenseFormInput, today: NaiveDate) -> Self {
        let date = input.date.unwrap_or(today);

        Self {
            date: date.and_time(NaiveTime::MIN),
            cost: round_to_cents(input.cost),
            location: input.location.trim().to_string(),
            comment: input.comment.trim().to_string(),
            gift: input.gift,
        }
    }

    pub fn calendar_date(&self) -> NaiveDate {
        self.date.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_form_trims_rounds_and_normalizes() {
        let input = ExpenseFormInput {
            date: Some(day(2024, 3, 1)),
            cost: 12.345,
            location: "  Market \n".to_string(),
            comment: "\tweekly shop ".to_string(),
            gift: true,
        };

        let record = ExpenseRecord::from_form(input, day(2024, 3, 9));

        assert_eq!(record.date, day(2024, 3, 1).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(record.cost, 12.35);
        assert_eq!(record.location, "Market");
        assert_eq!(record.comment, "weekly shop");
        assert!(record.gift);
    }

    #[test]
    fn test_from_form_defaults_to_today() {
        let input = ExpenseFormInput {
            date: None,
            cost: 3.0,
            location: "Store".to_string(),
            comment: String::new(),
            gift: false,
        };

        let record = ExpenseRecord::from_form(input, day(2024, 7, 4));

        assert_eq!(record.calendar_date(), day(2024, 7, 4));
        assert_eq!(record.date.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_from_form_whitespace_location_becomes_empty() {
        let input = ExpenseFormInput {
            date: None,
            cost: 3.0,
            location: "   ".to_string(),
            comment: " ".to_string(),
            gift: false,
        };

        let record = ExpenseRecord::from_form(input, day(2024, 7, 4));

        assert!(record.location.is_empty());
        assert!(record.comment.is_empty());
    }
}
