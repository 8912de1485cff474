//! Route handlers: limiter gate first, then delegate to the core services.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use tally_core::{
    Analytics, BudgetLedger, CoreError, TransactionDraft, TransactionService, UpsertOutcome,
};
use tally_domain::{Budget, Category, MonthKey, MonthlyReport, Transaction};

use crate::error::{ApiError, ApiResult};
use crate::extract::rate_gate;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TransactionBody {
    pub amount: f64,
    pub date: String,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct BudgetBody {
    pub category: String,
    pub amount: f64,
    pub month: String,
}

#[derive(Debug, Deserialize)]
pub struct AmountBody {
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub name: &'static str,
    pub color: &'static str,
}

pub async fn list_transactions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Transaction>>> {
    rate_gate(&state, &headers)?;
    let transactions = TransactionService::list(state.store.as_ref())?;
    Ok(Json(transactions))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<TransactionBody>,
) -> ApiResult<Response> {
    rate_gate(&state, &headers)?;
    let draft = draft_from(body)?;
    let transaction = TransactionService::create(state.store.as_ref(), draft)?;
    Ok((StatusCode::CREATED, Json(transaction)).into_response())
}

pub async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<TransactionBody>,
) -> ApiResult<Json<Transaction>> {
    rate_gate(&state, &headers)?;
    let draft = draft_from(body)?;
    let transaction = TransactionService::update(state.store.as_ref(), id, draft)?;
    Ok(Json(transaction))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> ApiResult<Json<serde_json::Value>> {
    rate_gate(&state, &headers)?;
    TransactionService::delete(state.store.as_ref(), id)?;
    Ok(Json(json!({ "message": "Transaction deleted" })))
}

pub async fn list_budgets(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<Vec<Budget>>> {
    rate_gate(&state, &headers)?;
    let month = month_or_current(query.month)?;
    let budgets = BudgetLedger::budgets_for_month(state.store.as_ref(), month)?;
    Ok(Json(budgets))
}

pub async fn upsert_budget(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<BudgetBody>,
) -> ApiResult<Response> {
    rate_gate(&state, &headers)?;
    let category = parse_category(&body.category)?;
    let month = parse_month(&body.month)?;
    let (budget, outcome) =
        BudgetLedger::upsert(state.store.as_ref(), category, body.amount, month)?;
    let status = match outcome {
        UpsertOutcome::Created => StatusCode::CREATED,
        UpsertOutcome::Updated => StatusCode::OK,
    };
    Ok((status, Json(budget)).into_response())
}

pub async fn update_budget(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<AmountBody>,
) -> ApiResult<Json<Budget>> {
    rate_gate(&state, &headers)?;
    let budget = BudgetLedger::update_amount(state.store.as_ref(), id, body.amount)?;
    Ok(Json(budget))
}

pub async fn delete_budget(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> ApiResult<Json<serde_json::Value>> {
    rate_gate(&state, &headers)?;
    BudgetLedger::delete(state.store.as_ref(), id)?;
    Ok(Json(json!({ "message": "Budget deleted" })))
}

pub async fn list_categories(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<CategoryInfo>>> {
    rate_gate(&state, &headers)?;
    let categories = Category::ALL
        .into_iter()
        .map(|category| CategoryInfo {
            name: category.label(),
            color: category.color(),
        })
        .collect();
    Ok(Json(categories))
}

pub async fn monthly_analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<MonthlyReport>> {
    rate_gate(&state, &headers)?;
    let month = month_or_current(query.month)?;
    let transactions = TransactionService::list(state.store.as_ref())?;
    let budgets = BudgetLedger::budgets_for_month(state.store.as_ref(), month)?;
    let report = Analytics::monthly_report(&transactions, &budgets, month);
    Ok(Json(report))
}

fn draft_from(body: TransactionBody) -> ApiResult<TransactionDraft> {
    Ok(TransactionDraft {
        amount: body.amount,
        date: parse_date(&body.date)?,
        description: body.description,
        category: parse_category(&body.category)?,
    })
}

fn parse_category(label: &str) -> ApiResult<Category> {
    Category::from_label(label).ok_or_else(|| {
        ApiError(CoreError::Validation(format!("unknown category \"{label}\"")))
    })
}

fn parse_month(token: &str) -> ApiResult<MonthKey> {
    token
        .parse()
        .map_err(|err: tally_domain::MonthKeyError| ApiError(CoreError::Validation(err.to_string())))
}

fn parse_date(token: &str) -> ApiResult<NaiveDate> {
    token.parse().map_err(|_| {
        ApiError(CoreError::Validation(format!(
            "date must be formatted as YYYY-MM-DD, got \"{token}\""
        )))
    })
}

fn month_or_current(query: Option<String>) -> ApiResult<MonthKey> {
    match query {
        Some(token) => parse_month(&token),
        None => Ok(MonthKey::from_date(Utc::now().date_naive())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_and_month_parsing_reject_bad_input() {
        assert!(parse_category("Food & Dining").is_ok());
        assert!(parse_category("Groceries").is_err());
        assert!(parse_month("2024-05").is_ok());
        assert!(parse_month("2024-5").is_err());
        assert!(parse_date("2024-05-01").is_ok());
        assert!(parse_date("05/01/2024").is_err());
    }

    #[test]
    fn missing_month_query_defaults_to_the_current_month() {
        let month = month_or_current(None).unwrap();
        assert_eq!(month, MonthKey::from_date(Utc::now().date_naive()));
    }
}
