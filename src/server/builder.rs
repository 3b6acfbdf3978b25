//! ServerBuilder for fluent API to build HTTP servers

use super::router::{build_health_routes, build_payment_routes};
use crate::core::{AuthorizationProcessor, DataService, PaymentRecord, StatusPolicy};
use crate::payments::{PaymentAppState, PaymentService};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builder for creating the payment HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_data_service(InMemoryDataService::<PaymentRecord>::new())
///     .with_processor(StripeProcessor::from_config(&config.processor)?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    data_service: Option<Arc<dyn DataService<PaymentRecord>>>,
    processor: Option<Arc<dyn AuthorizationProcessor>>,
    status_policy: StatusPolicy,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            data_service: None,
            processor: None,
            status_policy: StatusPolicy::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the payment store (required)
    pub fn with_data_service(
        mut self,
        service: impl DataService<PaymentRecord> + 'static,
    ) -> Self {
        self.data_service = Some(Arc::new(service));
        self
    }

    /// Set an already shared payment store (required)
    pub fn with_shared_data_service(mut self, service: Arc<dyn DataService<PaymentRecord>>) -> Self {
        self.data_service = Some(service);
        self
    }

    /// Set the card-payment processor
    ///
    /// Without one, card payments are rejected.
    pub fn with_processor(mut self, processor: impl AuthorizationProcessor + 'static) -> Self {
        self.processor = Some(Arc::new(processor));
        self
    }

    /// Set (or clear) an already shared processor
    pub fn with_shared_processor(
        mut self,
        processor: Option<Arc<dyn AuthorizationProcessor>>,
    ) -> Self {
        self.processor = processor;
        self
    }

    /// Choose how status updates are checked
    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for endpoints outside the payment contract, such as a
    /// processor webhook receiver.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the payment service from the configured collaborators
    pub fn build_service(&mut self) -> Result<PaymentService> {
        let store = self.data_service.take().ok_or_else(|| {
            anyhow::anyhow!("A payment DataService is required. Call .with_data_service()")
        })?;

        Ok(PaymentService::new(
            store,
            self.processor.take(),
            self.status_policy,
        ))
    }

    /// Build the final router
    ///
    /// This generates:
    /// - Health routes
    /// - Payment routes
    /// - Custom routes
    pub fn build(mut self) -> Result<Router> {
        let service = self.build_service()?;

        if !service.has_processor() {
            tracing::warn!("Payment server built without a processor, card payments are disabled");
        }

        let state = PaymentAppState {
            service: Arc::new(service),
        };

        let mut app = build_health_routes().merge(build_payment_routes(state));
        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }

        Ok(app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
