//! The payment record and the small closed vocabularies around it

use crate::core::entity::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Currency applied when the caller does not supply one
pub const DEFAULT_CURRENCY: &str = "usd";

/// How the customer intends to settle the payment.
///
/// Callers may send any string; the two methods the service knows about get
/// their own variants and everything else is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    /// Settled outside the system at delivery time, no processor involved
    CashOnDelivery,
    /// Authorized through the external payment processor
    #[default]
    Card,
    /// Any other caller-supplied method, routed through the processor
    Other(String),
}

impl PaymentMethod {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
            PaymentMethod::Card => "card",
            PaymentMethod::Other(method) => method,
        }
    }

    /// Whether this method needs an authorization intent from the processor
    pub fn requires_processor(&self) -> bool {
        !matches!(self, PaymentMethod::CashOnDelivery)
    }
}

impl From<String> for PaymentMethod {
    fn from(value: String) -> Self {
        match value.as_str() {
            "cash_on_delivery" => PaymentMethod::CashOnDelivery,
            "card" => PaymentMethod::Card,
            _ => PaymentMethod::Other(value),
        }
    }
}

impl From<&str> for PaymentMethod {
    fn from(value: &str) -> Self {
        PaymentMethod::from(value.to_string())
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Other(method) => method,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a payment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Recorded, awaiting confirmation or delivery
    Pending,
    /// Processor accepted the authorization, funds not yet captured
    Authorized,
    /// Funds collected
    Succeeded,
    /// Authorization or collection failed
    Failed,
    /// Abandoned before completion
    Cancelled,
    /// Collected funds returned to the customer
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 6] = [
        PaymentStatus::Pending,
        PaymentStatus::Authorized,
        PaymentStatus::Succeeded,
        PaymentStatus::Failed,
        PaymentStatus::Cancelled,
        PaymentStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Authorized => "authorized",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Refunded => "refunded",
        }
    }

    /// Whether no further transition is allowed out of this status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Failed | PaymentStatus::Cancelled | PaymentStatus::Refunded
        )
    }

    /// Check a transition against the lifecycle table.
    ///
    /// Re-setting the current status is always accepted.
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;

        if *self == next {
            return true;
        }

        match self {
            Pending => matches!(next, Authorized | Succeeded | Failed | Cancelled),
            Authorized => matches!(next, Succeeded | Failed | Cancelled),
            Succeeded => matches!(next, Refunded),
            Failed | Cancelled | Refunded => false,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status string is not one of the known states
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = PaymentStatus::ALL.iter().map(|s| s.as_str()).collect();
        write!(
            f,
            "Unknown payment status '{}'; expected one of: {}",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for PaymentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// How strictly status updates are checked against the lifecycle table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Only transitions allowed by [`PaymentStatus::can_transition_to`]
    #[default]
    Strict,
    /// Any known status may overwrite any other
    Permissive,
}

impl StatusPolicy {
    pub fn allows(&self, from: PaymentStatus, to: PaymentStatus) -> bool {
        match self {
            StatusPolicy::Strict => from.can_transition_to(to),
            StatusPolicy::Permissive => true,
        }
    }
}

impl FromStr for StatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(StatusPolicy::Strict),
            "permissive" => Ok(StatusPolicy::Permissive),
            other => Err(format!(
                "unknown status policy '{}', expected 'strict' or 'permissive'",
                other
            )),
        }
    }
}

/// A recorded payment attempt for an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: Uuid,
    pub user_id: String,
    pub order_id: String,
    /// Major currency units, exactly as the caller supplied them
    pub amount: f64,
    pub currency: String,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    /// Processor-side tracking id, only for processor-backed payments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_authorization_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Build a fresh `pending` record with a newly assigned id
    pub fn new(
        user_id: impl Into<String>,
        order_id: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
        method: PaymentMethod,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            order_id: order_id.into(),
            amount,
            currency: currency.into(),
            method,
            status: PaymentStatus::Pending,
            external_authorization_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_external_authorization(mut self, authorization_id: impl Into<String>) -> Self {
        self.external_authorization_id = Some(authorization_id.into());
        self
    }
}

impl Entity for PaymentRecord {
    fn resource_name() -> &'static str {
        "payments"
    }

    fn resource_name_singular() -> &'static str {
        "payment"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Convert a major-unit amount into the processor's minor units.
///
/// Multiplies by 100 and rounds to the nearest integer, half away from zero.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}
