use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::extractors::CurrentSession,
    error::{ApiError, ApiResult},
    expenses::{
        dto::{DateRange, NewExpenseRequest, Summary},
        repo::Expense,
        services,
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses))
        .route("/expenses/latest", get(latest_expense))
        .route("/expenses/summary", get(expense_summary))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/expenses", post(create_expense))
}

#[instrument(skip(state, session, payload))]
pub async fn create_expense(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<NewExpenseRequest>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    for (field, value) in payload.amounts() {
        if value < 0.0 || !value.is_finite() {
            return Err(ApiError::Validation(format!(
                "{field} must be a non-negative amount"
            )));
        }
    }

    let expense = Expense::insert(&state.db, session.user_id, &payload).await?;
    info!(
        user_id = session.user_id,
        expense_id = expense.id,
        date = %expense.date,
        "expense entry recorded"
    );
    Ok((StatusCode::CREATED, Json(expense)))
}

#[instrument(skip(state, session))]
pub async fn list_expenses(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(range): Query<DateRange>,
) -> ApiResult<Json<Vec<Expense>>> {
    let entries =
        Expense::list_by_user(&state.db, session.user_id, range.start_date, range.end_date)
            .await?;
    Ok(Json(entries))
}

#[instrument(skip(state, session))]
pub async fn latest_expense(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> ApiResult<Json<Expense>> {
    let entry = Expense::latest_by_user(&state.db, session.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No expense entries recorded".into()))?;
    Ok(Json(entry))
}

#[instrument(skip(state, session))]
pub async fn expense_summary(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(range): Query<DateRange>,
) -> ApiResult<Json<Summary>> {
    let entries =
        Expense::list_by_user(&state.db, session.user_id, range.start_date, range.end_date)
            .await?;
    Ok(Json(services::summarize(&entries)))
}
