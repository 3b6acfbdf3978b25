//! Authorization processor implementations
//!
//! The service only ever sees `Arc<dyn AuthorizationProcessor>`. This module
//! is the single place where configuration turns into a concrete processor.

#[cfg(feature = "stripe")]
pub mod stripe;

#[cfg(feature = "stripe")]
pub use stripe::StripeProcessor;

use crate::config::ProcessorConfig;
use crate::core::AuthorizationProcessor;
use anyhow::Result;
use std::sync::Arc;

/// Build the configured processor.
///
/// Returns `Ok(None)` when no secret key is configured; card payments are then
/// refused by the service before any outbound call.
pub fn from_config(config: &ProcessorConfig) -> Result<Option<Arc<dyn AuthorizationProcessor>>> {
    if !config.is_configured() {
        tracing::warn!("No payment processor configured, card payments will be rejected");
        return Ok(None);
    }

    build(config)
}

#[cfg(feature = "stripe")]
fn build(config: &ProcessorConfig) -> Result<Option<Arc<dyn AuthorizationProcessor>>> {
    let processor = StripeProcessor::from_config(config)?;
    tracing::info!(api_base = %config.api_base, "Stripe processor configured");
    Ok(Some(Arc::new(processor)))
}

#[cfg(not(feature = "stripe"))]
fn build(_config: &ProcessorConfig) -> Result<Option<Arc<dyn AuthorizationProcessor>>> {
    anyhow::bail!("A processor secret key is set but the `stripe` feature is disabled")
}
