//! Service traits for persistence and payment authorization

use crate::core::Entity;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Service trait for persisting entities
///
/// Implementations provide the four operations the payment service needs.
/// The service is agnostic to the underlying storage mechanism and assumes no
/// transactional guarantees beyond a single call.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Insert a new entity
    async fn create(&self, entity: T) -> Result<T>;

    /// Get an entity by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// List all entities, oldest first
    async fn list(&self) -> Result<Vec<T>>;

    /// Save a previously fetched entity after mutating it
    ///
    /// Fails if no entity with that ID exists.
    async fn update(&self, id: &Uuid, entity: T) -> Result<T>;
}

/// Opaque key/value pairs attached to an authorization intent
pub type IntentMetadata = BTreeMap<String, String>;

/// What the processor hands back for a newly created authorization intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationIntent {
    /// Processor-side tracking id
    pub id: String,
    /// Token the caller uses to confirm the payment directly with the processor
    pub client_secret: String,
}

/// External card-payment processor
///
/// Only one capability crosses this boundary; processor-specific response
/// shapes stay inside the implementation.
#[async_trait]
pub trait AuthorizationProcessor: Send + Sync {
    /// Request an authorization intent for `amount_minor` units of `currency`
    async fn create_authorization_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        metadata: &IntentMetadata,
    ) -> Result<AuthorizationIntent>;
}
