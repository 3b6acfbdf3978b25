//! # Payment Records
//!
//! A small HTTP service that records payment attempts for orders.
//!
//! ## Features
//!
//! - **Cash on delivery**: recorded directly, no external call
//! - **Card payments**: an authorization intent is created at the processor
//!   and its client secret handed back to the caller
//! - **Status updates**: a closed set of statuses checked against a lifecycle
//!   table (strict) or accepted as-is (permissive)
//! - **Pluggable collaborators**: storage (`DataService`) and processor
//!   (`AuthorizationProcessor`) are injected traits
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use payment_records::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_data_service(InMemoryDataService::<PaymentRecord>::new())
//!     .build()?;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod payments;
pub mod processor;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        AuthorizationIntent, AuthorizationProcessor, DataService, Entity, IntentMetadata,
        PaymentError, PaymentMethod, PaymentRecord, PaymentStatus, StatusPolicy,
    };

    // === Service ===
    pub use crate::payments::{CreatedPayment, NewPayment, PaymentService};

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryDataService;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoDataService;

    // === Processor ===
    #[cfg(feature = "stripe")]
    pub use crate::processor::StripeProcessor;

    // === Config ===
    pub use crate::config::{ProcessorConfig, ServiceConfig, StorageBackend, StorageConfig};

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use uuid::Uuid;
}
