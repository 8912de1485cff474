//! API route table.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers;
use crate::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route(
            "/api/transactions/:id",
            put(handlers::update_transaction).delete(handlers::delete_transaction),
        )
        .route(
            "/api/budgets",
            get(handlers::list_budgets).post(handlers::upsert_budget),
        )
        .route(
            "/api/budgets/:id",
            put(handlers::update_budget).delete(handlers::delete_budget),
        )
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/analytics", get(handlers::monthly_analytics))
}
