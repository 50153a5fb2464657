use crate::domain::models::expense::ExpenseRecord;
use shared::Expense as SharedExpense;

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(domain: ExpenseRecord) -> SharedExpense {
        SharedExpense {
            date: domain.date,
            cost: domain.cost,
            location: domain.location,
            comment: domain.comment,
            gift: domain.gift,
        }
    }
}
