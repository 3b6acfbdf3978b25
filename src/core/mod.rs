//! Core module containing the payment domain types and the collaborator traits

pub mod entity;
pub mod error;
pub mod payment;
pub mod service;

pub use entity::Entity;
pub use error::{ErrorResponse, PaymentError};
pub use payment::{
    DEFAULT_CURRENCY, PaymentMethod, PaymentRecord, PaymentStatus, StatusPolicy, UnknownStatus,
    to_minor_units,
};
pub use service::{AuthorizationIntent, AuthorizationProcessor, DataService, IntentMetadata};
