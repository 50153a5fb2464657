//! Optional cost-over-date chart series.

use shared::{ChartPoint, ChartSeriesResponse, Expense};

/// One point per expense, ordered by date (stable for equal dates)
pub fn cost_over_date(expenses: &[Expense]) -> ChartSeriesResponse {
    let mut points: Vec<ChartPoint> = expenses
        .iter()
        .map(|expense| ChartPoint {
            date: expense.date.date(),
            cost: expense.cost,
        })
        .collect();
    points.sort_by_key(|point| point.date);

    ChartSeriesResponse { points }
}
