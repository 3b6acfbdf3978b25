//! Shared test harness for payment API tests
//!
//! Provides a recording mock processor and helpers that build a full
//! `TestServer` around an in-memory store.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum_test::TestServer;
use payment_records::prelude::*;
use std::sync::{Arc, Mutex};

/// One call received by [`MockProcessor`]
#[derive(Debug, Clone, PartialEq)]
pub struct IntentCall {
    pub amount_minor: i64,
    pub currency: String,
    pub metadata: IntentMetadata,
}

/// Processor double: records every call and answers with a canned outcome
#[derive(Clone, Default)]
pub struct MockProcessor {
    calls: Arc<Mutex<Vec<IntentCall>>>,
    failure: Option<String>,
}

impl MockProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// A processor that rejects every intent with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<IntentCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthorizationProcessor for MockProcessor {
    async fn create_authorization_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        metadata: &IntentMetadata,
    ) -> Result<AuthorizationIntent> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(IntentCall {
            amount_minor,
            currency: currency.to_string(),
            metadata: metadata.clone(),
        });

        if let Some(message) = &self.failure {
            return Err(anyhow!(message.clone()));
        }

        let n = calls.len();
        Ok(AuthorizationIntent {
            id: format!("pi_mock_{}", n),
            client_secret: format!("pi_mock_{}_secret", n),
        })
    }
}

/// A running test server plus handles on its collaborators
pub struct TestApp {
    pub server: TestServer,
    pub store: InMemoryDataService<PaymentRecord>,
    pub processor: Option<MockProcessor>,
}

/// Build a server over a fresh in-memory store
pub fn spawn_app(processor: Option<MockProcessor>, policy: StatusPolicy) -> TestApp {
    let store = InMemoryDataService::<PaymentRecord>::new();

    let mut builder = ServerBuilder::new()
        .with_data_service(store.clone())
        .with_status_policy(policy);
    if let Some(processor) = processor.clone() {
        builder = builder.with_processor(processor);
    }

    let router = builder.build().unwrap();

    TestApp {
        server: TestServer::new(router),
        store,
        processor,
    }
}

/// Server with a working mock processor and the strict policy
pub fn spawn_card_app() -> TestApp {
    spawn_app(Some(MockProcessor::new()), StatusPolicy::Strict)
}

/// Server without any processor
pub fn spawn_cod_only_app() -> TestApp {
    spawn_app(None, StatusPolicy::Strict)
}
