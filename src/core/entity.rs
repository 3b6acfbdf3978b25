//! Entity trait defining the storage-facing abstraction for persisted records

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for every record kept by a [`DataService`](crate::core::DataService).
///
/// Storage backends only need to know how a record is identified, where it
/// lives and when it was written:
/// - id: Unique identifier, immutable after creation
/// - resource_name: Collection/table name (e.g., "payments")
/// - created_at / updated_at: Bookkeeping timestamps
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used for collections and URLs (e.g., "payments")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "payment")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Refresh the last update timestamp before a save
    fn touch(&mut self);
}
