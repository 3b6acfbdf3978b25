//! HTTP handlers for payment operations

use super::service::{NewPayment, PaymentService};
use crate::core::{PaymentError, PaymentRecord};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// State shared by the payment handlers
#[derive(Clone)]
pub struct PaymentAppState {
    pub service: Arc<PaymentService>,
}

/// Body of `PUT /payments/status`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub payment_id: String,
    pub status: String,
}

/// Body returned by `POST /payments`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentResponse {
    pub payment: PaymentRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Turn a body rejection into our 400 error shape
fn body_error(rejection: JsonRejection) -> PaymentError {
    PaymentError::Validation {
        message: rejection.body_text(),
    }
}

/// POST /payments
pub async fn create_payment(
    State(state): State<PaymentAppState>,
    payload: Result<Json<NewPayment>, JsonRejection>,
) -> Result<Response, PaymentError> {
    let Json(input) = payload.map_err(body_error)?;

    let created = state.service.create_payment(input).await?;
    let message = created
        .client_secret
        .is_none()
        .then(|| "COD payment created successfully".to_string());

    let body = CreatePaymentResponse {
        payment: created.payment,
        client_secret: created.client_secret,
        message,
    };

    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// PUT /payments/status
///
/// Unauthenticated; intended for internal callers only.
pub async fn update_payment_status(
    State(state): State<PaymentAppState>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<PaymentRecord>, PaymentError> {
    let Json(request) = payload.map_err(body_error)?;

    state
        .service
        .update_payment_status(&request.payment_id, &request.status)
        .await
        .map(Json)
}

/// GET /payments
pub async fn list_payments(
    State(state): State<PaymentAppState>,
) -> Result<Json<Vec<PaymentRecord>>, PaymentError> {
    state.service.list_payments().await.map(Json)
}

/// GET /payments/{id}
pub async fn get_payment(
    State(state): State<PaymentAppState>,
    Path(id): Path<String>,
) -> Result<Json<PaymentRecord>, PaymentError> {
    state.service.get_payment(&id).await.map(Json)
}
