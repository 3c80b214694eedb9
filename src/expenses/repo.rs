use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::Date;

use crate::expenses::dto::NewExpenseRequest;

/// One day's recorded figures for a user. Entries are append-only: there is
/// no update or delete path, only creation and querying.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub date: Date,
    pub budget: f64,
    pub salary: f64,
    pub side_job: f64,
    pub gift: f64,
    pub interest: f64,
    pub food: f64,
    pub transportation: f64,
    pub grocery: f64,
    pub savings: f64,
}

const EXPENSE_COLUMNS: &str = "id, user_id, date, budget, salary, side_job, gift, interest, \
     food, transportation, grocery, savings";

impl Expense {
    /// Insert one entry scoped to `user_id`. A nonexistent user surfaces as
    /// a foreign-key violation from the database.
    pub async fn insert(db: &PgPool, user_id: i64, req: &NewExpenseRequest) -> sqlx::Result<Expense> {
        sqlx::query_as::<_, Expense>(&format!(
            r#"
            INSERT INTO expenses
                (user_id, date, budget, salary, side_job, gift, interest,
                 food, transportation, grocery, savings)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {EXPENSE_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(req.date)
        .bind(req.budget)
        .bind(req.salary)
        .bind(req.side_job)
        .bind(req.gift)
        .bind(req.interest)
        .bind(req.food)
        .bind(req.transportation)
        .bind(req.grocery)
        .bind(req.savings)
        .fetch_one(db)
        .await
    }

    /// Entries for one user, optionally bounded by an inclusive date range.
    pub async fn list_by_user(
        db: &PgPool,
        user_id: i64,
        start_date: Option<Date>,
        end_date: Option<Date>,
    ) -> sqlx::Result<Vec<Expense>> {
        sqlx::query_as::<_, Expense>(&format!(
            r#"
            SELECT {EXPENSE_COLUMNS}
            FROM expenses
            WHERE user_id = $1
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            ORDER BY date
            "#
        ))
        .bind(user_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(db)
        .await
    }

    /// Most recent entry by date, if any.
    pub async fn latest_by_user(db: &PgPool, user_id: i64) -> sqlx::Result<Option<Expense>> {
        sqlx::query_as::<_, Expense>(&format!(
            r#"
            SELECT {EXPENSE_COLUMNS}
            FROM expenses
            WHERE user_id = $1
            ORDER BY date DESC
            LIMIT 1
            "#
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await
    }
}
