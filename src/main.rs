//! Payment records server
//!
//! Configuration comes from `PAYMENTS_CONFIG` (YAML) and environment
//! variables; see `ServiceConfig`. Set `STRIPE_SECRET_KEY` to accept card
//! payments.

use anyhow::Result;
use payment_records::config::{ServiceConfig, StorageBackend};
use payment_records::prelude::*;
use payment_records::processor;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("payment_records=info,tower_http=info")),
        )
        .init();

    let config = ServiceConfig::from_env()?;
    tracing::info!(?config, "Loaded configuration");

    let builder = ServerBuilder::new()
        .with_status_policy(config.status_policy)
        .with_shared_processor(processor::from_config(&config.processor)?);

    let builder = match config.storage.backend {
        StorageBackend::Memory => with_memory_store(builder)?,
        StorageBackend::Mongodb => with_mongo_store(builder, &config).await?,
    };

    builder.serve(&config.listen_addr).await
}

#[cfg(feature = "in-memory")]
fn with_memory_store(builder: ServerBuilder) -> Result<ServerBuilder> {
    tracing::warn!("Using in-memory storage, payments are lost on restart");
    Ok(builder.with_data_service(InMemoryDataService::<PaymentRecord>::new()))
}

#[cfg(not(feature = "in-memory"))]
fn with_memory_store(_builder: ServerBuilder) -> Result<ServerBuilder> {
    use payment_records::config::ConfigError;
    Err(ConfigError::BackendUnavailable("memory".to_string(), "in-memory").into())
}

#[cfg(feature = "mongodb_backend")]
async fn with_mongo_store(builder: ServerBuilder, config: &ServiceConfig) -> Result<ServerBuilder> {
    let store = MongoDataService::<PaymentRecord>::connect(
        &config.storage.mongodb_uri,
        &config.storage.database,
    )
    .await?;
    tracing::info!(database = %config.storage.database, "Using MongoDB storage");
    Ok(builder.with_data_service(store))
}

#[cfg(not(feature = "mongodb_backend"))]
async fn with_mongo_store(
    _builder: ServerBuilder,
    _config: &ServiceConfig,
) -> Result<ServerBuilder> {
    use payment_records::config::ConfigError;
    Err(ConfigError::BackendUnavailable("mongodb".to_string(), "mongodb_backend").into())
}
