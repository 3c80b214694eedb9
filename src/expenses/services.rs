//! Summary arithmetic for the dashboard.

use crate::expenses::dto::Summary;
use crate::expenses::repo::Expense;

pub fn total_income(e: &Expense) -> f64 {
    e.salary + e.side_job + e.gift + e.interest
}

pub fn total_expenses(e: &Expense) -> f64 {
    e.food + e.transportation + e.grocery + e.savings
}

/// Aggregate a set of entries into the figures the overview page shows.
///
/// The budget is a monthly target, not a per-entry amount, so the summary
/// takes it from the latest entry in the set rather than summing it.
pub fn summarize(entries: &[Expense]) -> Summary {
    let income: f64 = entries.iter().map(total_income).sum();
    let spent: f64 = entries.iter().map(total_expenses).sum();
    let budget = entries
        .iter()
        .max_by_key(|e| e.date)
        .map(|e| e.budget)
        .unwrap_or(0.0);
    Summary {
        total_income: income,
        total_expenses: spent,
        balance: income - spent,
        budget,
        remaining_budget: budget - spent,
        entry_count: entries.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn entry(d: time::Date) -> Expense {
        Expense {
            id: 0,
            user_id: 1,
            date: d,
            budget: 0.0,
            salary: 0.0,
            side_job: 0.0,
            gift: 0.0,
            interest: 0.0,
            food: 0.0,
            transportation: 0.0,
            grocery: 0.0,
            savings: 0.0,
        }
    }

    #[test]
    fn empty_set_summarizes_to_zeroes() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expenses, 0.0);
        assert_eq!(summary.balance, 0.0);
        assert_eq!(summary.budget, 0.0);
        assert_eq!(summary.entry_count, 0);
    }

    #[test]
    fn income_and_expense_categories_sum_separately() {
        let mut e = entry(date!(2025 - 02 - 01));
        e.salary = 2000.0;
        e.side_job = 300.0;
        e.gift = 50.0;
        e.interest = 10.0;
        e.food = 400.0;
        e.transportation = 120.0;
        e.grocery = 250.0;
        e.savings = 500.0;

        assert_eq!(total_income(&e), 2360.0);
        assert_eq!(total_expenses(&e), 1270.0);

        let summary = summarize(&[e]);
        assert_eq!(summary.balance, 2360.0 - 1270.0);
    }

    #[test]
    fn budget_comes_from_latest_entry() {
        let mut old = entry(date!(2025 - 01 - 05));
        old.budget = 1000.0;
        old.food = 100.0;
        let mut new = entry(date!(2025 - 01 - 20));
        new.budget = 1500.0;
        new.grocery = 200.0;

        let summary = summarize(&[old, new]);
        assert_eq!(summary.budget, 1500.0);
        assert_eq!(summary.remaining_budget, 1500.0 - 300.0);
        assert_eq!(summary.entry_count, 2);
    }
}
