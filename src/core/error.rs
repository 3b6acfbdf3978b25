//! Typed error handling for the payment service
//!
//! Every failure a request can hit is a [`PaymentError`]. Each variant knows
//! its HTTP status and a stable error code, and renders as
//! `{"error": "<message>", "code": "<CODE>"}`.
//!
//! # Example
//!
//! ```rust,ignore
//! match service.get_payment(&id).await {
//!     Ok(payment) => println!("Found: {:?}", payment),
//!     Err(PaymentError::NotFound { id }) => println!("Payment {} not found", id),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::core::payment::PaymentStatus;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The error type returned by every payment operation
#[derive(Debug)]
pub enum PaymentError {
    /// Card payment requested but no processor is configured
    Configuration {
        message: String,
    },

    /// Request body or field could not be accepted
    Validation {
        message: String,
    },

    /// Requested status change is not allowed from the current status
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    /// The external processor rejected or failed the authorization intent
    Processor {
        message: String,
    },

    /// No payment with that id exists
    NotFound {
        id: String,
    },

    /// Storage failed while serving a mutating request (create, update)
    Persistence {
        message: String,
    },

    /// Storage failed while serving a read-only request (list, get)
    Unavailable {
        message: String,
    },
}

impl fmt::Display for PaymentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentError::Configuration { message } => write!(f, "{}", message),
            PaymentError::Validation { message } => write!(f, "{}", message),
            PaymentError::InvalidTransition { from, to } => {
                write!(
                    f,
                    "Cannot change payment status from '{}' to '{}'",
                    from, to
                )
            }
            PaymentError::Processor { message } => write!(f, "{}", message),
            PaymentError::NotFound { .. } => write!(f, "Payment not found"),
            PaymentError::Persistence { message } => write!(f, "{}", message),
            PaymentError::Unavailable { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for PaymentError {}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
}

impl PaymentError {
    /// Processor missing for a card payment
    pub fn processor_not_configured() -> Self {
        PaymentError::Configuration {
            message: "Payment processor is not configured. Set STRIPE_SECRET_KEY to accept card payments."
                .to_string(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// Configuration and processor failures are reported to the caller as
    /// client errors.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::Configuration { .. } => StatusCode::BAD_REQUEST,
            PaymentError::Validation { .. } => StatusCode::BAD_REQUEST,
            PaymentError::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
            PaymentError::Processor { .. } => StatusCode::BAD_REQUEST,
            PaymentError::NotFound { .. } => StatusCode::NOT_FOUND,
            PaymentError::Persistence { .. } => StatusCode::BAD_REQUEST,
            PaymentError::Unavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            PaymentError::Configuration { .. } => "CONFIGURATION_ERROR",
            PaymentError::Validation { .. } => "VALIDATION_ERROR",
            PaymentError::InvalidTransition { .. } => "INVALID_STATUS_TRANSITION",
            PaymentError::Processor { .. } => "PROCESSOR_ERROR",
            PaymentError::NotFound { .. } => "PAYMENT_NOT_FOUND",
            PaymentError::Persistence { .. } => "STORAGE_ERROR",
            PaymentError::Unavailable { .. } => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<crate::core::payment::UnknownStatus> for PaymentError {
    fn from(err: crate::core::payment::UnknownStatus) -> Self {
        PaymentError::Validation {
            message: err.to_string(),
        }
    }
}
