use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/ping", get(ping))
}

/// Reports the list controller's view and live subscription count.
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let view = state.controller().state();
    Json(json!({
        "status": "ok",
        "collection": state.config().collection,
        "loading": view.loading,
        "records": view.records.len(),
        "subscribers": state.store().live_subscriptions(),
    }))
}

/// Lightweight ping.
async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
