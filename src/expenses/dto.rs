use serde::{Deserialize, Serialize};
use time::Date;

/// Request body for recording one day's figures. Omitted amounts default
/// to 0.0, matching the table defaults.
#[derive(Debug, Deserialize)]
pub struct NewExpenseRequest {
    pub date: Date,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub salary: f64,
    #[serde(default)]
    pub side_job: f64,
    #[serde(default)]
    pub gift: f64,
    #[serde(default)]
    pub interest: f64,
    #[serde(default)]
    pub food: f64,
    #[serde(default)]
    pub transportation: f64,
    #[serde(default)]
    pub grocery: f64,
    #[serde(default)]
    pub savings: f64,
}

impl NewExpenseRequest {
    pub fn amounts(&self) -> [(&'static str, f64); 9] {
        [
            ("budget", self.budget),
            ("salary", self.salary),
            ("side_job", self.side_job),
            ("gift", self.gift),
            ("interest", self.interest),
            ("food", self.food),
            ("transportation", self.transportation),
            ("grocery", self.grocery),
            ("savings", self.savings),
        ]
    }
}

/// Optional inclusive date bounds for listing and summary queries.
#[derive(Debug, Default, Deserialize)]
pub struct DateRange {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// Totals the dashboard renders for a period.
#[derive(Debug, Serialize, PartialEq)]
pub struct Summary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub budget: f64,
    pub remaining_budget: f64,
    pub entry_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_amounts_default_to_zero() {
        let req: NewExpenseRequest =
            serde_json::from_str(r#"{"date": "2025-03-01", "salary": 1200.0}"#).unwrap();
        assert_eq!(req.salary, 1200.0);
        assert_eq!(req.budget, 0.0);
        assert_eq!(req.food, 0.0);
        assert_eq!(req.savings, 0.0);
    }

    #[test]
    fn date_range_bounds_are_optional() {
        let range: DateRange = serde_json::from_str(r#"{"start_date": "2025-01-01"}"#).unwrap();
        assert!(range.start_date.is_some());
        assert!(range.end_date.is_none());
    }
}
