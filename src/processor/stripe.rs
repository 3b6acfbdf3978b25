//! Stripe payment intents over the REST API
//!
//! Only `POST /v1/payment_intents` is used. The request is form-encoded and
//! authenticated with the secret key as a bearer token.

use crate::config::ProcessorConfig;
use crate::core::{AuthorizationIntent, AuthorizationProcessor, IntentMetadata};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;

/// Authorization processor backed by Stripe payment intents
#[derive(Clone)]
pub struct StripeProcessor {
    client: reqwest::Client,
    secret_key: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct PaymentIntentResponse {
    id: String,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl StripeProcessor {
    /// Build a client from configuration; fails when no secret key is set.
    pub fn from_config(config: &ProcessorConfig) -> Result<Self> {
        let secret_key = config
            .secret_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| anyhow!("Stripe secret key is not set"))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client,
            secret_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.api_base)
    }

    fn form_params(
        amount_minor: i64,
        currency: &str,
        metadata: &IntentMetadata,
    ) -> Vec<(String, String)> {
        let mut params = vec![
            ("amount".to_string(), amount_minor.to_string()),
            ("currency".to_string(), currency.to_string()),
        ];
        params.extend(
            metadata
                .iter()
                .map(|(key, value)| (format!("metadata[{}]", key), value.clone())),
        );
        params
    }
}

#[async_trait]
impl AuthorizationProcessor for StripeProcessor {
    async fn create_authorization_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        metadata: &IntentMetadata,
    ) -> Result<AuthorizationIntent> {
        let response = self
            .client
            .post(self.intents_url())
            .bearer_auth(&self.secret_key)
            .form(&Self::form_params(amount_minor, currency, metadata))
            .send()
            .await
            .map_err(|e| anyhow!("Failed to reach Stripe: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<StripeErrorBody>(&body) {
                Ok(StripeErrorBody {
                    error:
                        StripeErrorDetail {
                            message: Some(message),
                            ..
                        },
                }) => message,
                Ok(StripeErrorBody {
                    error: StripeErrorDetail { kind: Some(kind), .. },
                }) => format!("Stripe request failed ({}): {}", status, kind),
                _ => format!("Stripe request failed with status {}", status),
            };
            return Err(anyhow!(message));
        }

        let intent: PaymentIntentResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to decode Stripe response: {}", e))?;

        let client_secret = intent
            .client_secret
            .ok_or_else(|| anyhow!("Stripe payment intent {} has no client secret", intent.id))?;

        tracing::debug!(intent_id = %intent.id, amount_minor, currency, "Created Stripe payment intent");

        Ok(AuthorizationIntent {
            id: intent.id,
            client_secret,
        })
    }
}
