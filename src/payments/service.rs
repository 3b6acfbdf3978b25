//! Payment record service: the four operations behind the HTTP handlers

use crate::core::{
    AuthorizationProcessor, DEFAULT_CURRENCY, DataService, Entity, IntentMetadata, PaymentError,
    PaymentMethod, PaymentRecord, PaymentStatus, StatusPolicy, to_minor_units,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Input for [`PaymentService::create_payment`]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub user_id: String,
    pub order_id: String,
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

impl NewPayment {
    /// Currency to record, falling back to `usd` when absent or empty
    pub fn currency(&self) -> String {
        self.currency
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string()
    }

    /// Method to record, falling back to `card` when absent or empty
    pub fn method(&self) -> PaymentMethod {
        self.method
            .as_deref()
            .filter(|m| !m.is_empty())
            .map(PaymentMethod::from)
            .unwrap_or_default()
    }
}

/// Outcome of a successful create
#[derive(Debug, Clone)]
pub struct CreatedPayment {
    pub payment: PaymentRecord,
    /// Present only for processor-backed payments
    pub client_secret: Option<String>,
}

/// Records payments and, for non-cash methods, asks the processor for an
/// authorization intent.
///
/// Both collaborators are injected; nothing here is process-global.
#[derive(Clone)]
pub struct PaymentService {
    store: Arc<dyn DataService<PaymentRecord>>,
    processor: Option<Arc<dyn AuthorizationProcessor>>,
    policy: StatusPolicy,
}

impl PaymentService {
    pub fn new(
        store: Arc<dyn DataService<PaymentRecord>>,
        processor: Option<Arc<dyn AuthorizationProcessor>>,
        policy: StatusPolicy,
    ) -> Self {
        Self {
            store,
            processor,
            policy,
        }
    }

    pub fn has_processor(&self) -> bool {
        self.processor.is_some()
    }

    pub fn status_policy(&self) -> StatusPolicy {
        self.policy
    }

    /// Create a payment record.
    ///
    /// Cash on delivery is persisted directly. Every other method first
    /// creates an authorization intent; if that fails nothing is persisted.
    pub async fn create_payment(&self, input: NewPayment) -> Result<CreatedPayment, PaymentError> {
        let currency = input.currency();
        let method = input.method();

        if !method.requires_processor() {
            let record = PaymentRecord::new(
                input.user_id,
                input.order_id,
                input.amount,
                currency,
                method,
            );
            let payment = self.persist_new(record).await?;

            tracing::info!(
                payment_id = %payment.id,
                order_id = %payment.order_id,
                "Cash on delivery payment recorded"
            );

            return Ok(CreatedPayment {
                payment,
                client_secret: None,
            });
        }

        let processor = self.processor.as_ref().ok_or_else(|| {
            tracing::warn!(order_id = %input.order_id, %method, "Card payment refused, no processor configured");
            PaymentError::processor_not_configured()
        })?;

        let amount_minor = to_minor_units(input.amount);
        let mut metadata = IntentMetadata::new();
        metadata.insert("userId".to_string(), input.user_id.clone());
        metadata.insert("orderId".to_string(), input.order_id.clone());

        let intent = processor
            .create_authorization_intent(amount_minor, &currency, &metadata)
            .await
            .map_err(|e| {
                tracing::warn!(order_id = %input.order_id, error = %e, "Authorization intent failed");
                PaymentError::Processor {
                    message: e.to_string(),
                }
            })?;

        let record = PaymentRecord::new(
            input.user_id,
            input.order_id,
            input.amount,
            currency,
            method,
        )
        .with_external_authorization(intent.id.clone());

        let payment = self.persist_new(record).await.inspect_err(|_| {
            // The intent now exists at the processor with no local record
            tracing::error!(
                authorization_id = %intent.id,
                "Payment record not saved after authorization intent was created"
            );
        })?;

        tracing::info!(
            payment_id = %payment.id,
            order_id = %payment.order_id,
            authorization_id = %intent.id,
            amount_minor,
            "Card payment recorded"
        );

        Ok(CreatedPayment {
            payment,
            client_secret: Some(intent.client_secret),
        })
    }

    /// Overwrite the status of an existing payment.
    ///
    /// `payment_id` that is not a UUID cannot name a record and is reported
    /// as not found.
    pub async fn update_payment_status(
        &self,
        payment_id: &str,
        status: &str,
    ) -> Result<PaymentRecord, PaymentError> {
        let id = parse_id(payment_id)?;
        let mut payment = self
            .store
            .get(&id)
            .await
            .map_err(|e| PaymentError::Persistence {
                message: e.to_string(),
            })?
            .ok_or_else(|| not_found(payment_id))?;

        let next: PaymentStatus = status.parse()?;
        let previous = payment.status;
        if !self.policy.allows(previous, next) {
            tracing::warn!(payment_id = %id, from = %previous, to = %next, "Status transition rejected");
            return Err(PaymentError::InvalidTransition {
                from: previous,
                to: next,
            });
        }

        payment.status = next;
        payment.touch();

        let saved = self
            .store
            .update(&id, payment)
            .await
            .map_err(|e| PaymentError::Persistence {
                message: e.to_string(),
            })?;

        tracing::info!(payment_id = %id, from = %previous, to = %next, "Payment status updated");

        Ok(saved)
    }

    /// Every stored payment, unfiltered and unpaginated
    pub async fn list_payments(&self) -> Result<Vec<PaymentRecord>, PaymentError> {
        self.store
            .list()
            .await
            .map_err(|e| PaymentError::Unavailable {
                message: e.to_string(),
            })
    }

    pub async fn get_payment(&self, payment_id: &str) -> Result<PaymentRecord, PaymentError> {
        let id = parse_id(payment_id)?;
        self.store
            .get(&id)
            .await
            .map_err(|e| PaymentError::Unavailable {
                message: e.to_string(),
            })?
            .ok_or_else(|| not_found(payment_id))
    }

    async fn persist_new(&self, record: PaymentRecord) -> Result<PaymentRecord, PaymentError> {
        self.store
            .create(record)
            .await
            .map_err(|e| PaymentError::Persistence {
                message: e.to_string(),
            })
    }
}

fn parse_id(payment_id: &str) -> Result<Uuid, PaymentError> {
    Uuid::parse_str(payment_id.trim()).map_err(|_| not_found(payment_id))
}

fn not_found(payment_id: &str) -> PaymentError {
    PaymentError::NotFound {
        id: payment_id.to_string(),
    }
}
