//! Router builder utilities for payment and health routes

use crate::payments::{
    PaymentAppState, create_payment, get_payment, list_payments, update_payment_status,
};
use axum::{
    Json, Router,
    routing::{get, put},
};
use serde_json::{Value, json};

/// Build payment routes
///
/// - POST /payments - Create a payment (cash on delivery or processor-backed)
/// - GET /payments - List every payment
/// - PUT /payments/status - Overwrite a payment's status
/// - GET /payments/{id} - Get a payment by id
pub fn build_payment_routes(state: PaymentAppState) -> Router {
    Router::new()
        .route("/payments", get(list_payments).post(create_payment))
        .route("/payments/status", put(update_payment_status))
        .route("/payments/{id}", get(get_payment))
        .with_state(state)
}

/// Build health check routes
pub fn build_health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
