//! Shared test harness for storage backend testing
//!
//! Provides helpers that build `PaymentRecord`s with predictable contents and
//! the `data_service_tests!` macro that checks any backend against the
//! `DataService<PaymentRecord>` contract.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod data_service_tests;

use chrono::{Duration, Utc};
use payment_records::core::{PaymentMethod, PaymentRecord};

// ---------------------------------------------------------------------------
// Helper functions: PaymentRecord creation
// ---------------------------------------------------------------------------

/// A pending cash-on-delivery record for `order_id`
pub fn cod_payment(order_id: &str) -> PaymentRecord {
    PaymentRecord::new("user-1", order_id, 25.0, "usd", PaymentMethod::CashOnDelivery)
}

/// A pending card record carrying a processor id
pub fn card_payment(order_id: &str, authorization_id: &str) -> PaymentRecord {
    PaymentRecord::new("user-1", order_id, 19.99, "eur", PaymentMethod::Card)
        .with_external_authorization(authorization_id)
}

/// Generate `n` records whose creation times increase with the index.
///
/// The batch is returned newest first so list ordering is actually exercised.
pub fn sample_batch(n: usize) -> Vec<PaymentRecord> {
    let base = Utc::now() - Duration::hours(1);
    let mut batch: Vec<PaymentRecord> = (0..n)
        .map(|i| {
            let mut record = cod_payment(&format!("order-{}", i));
            record.amount = (i as f64) * 1.5 + 0.5;
            record.created_at = base + Duration::seconds(i as i64);
            record.updated_at = record.created_at;
            record
        })
        .collect();
    batch.reverse();
    batch
}

// ---------------------------------------------------------------------------
// Assertions helpers
// ---------------------------------------------------------------------------

/// Assert that a list contains exactly `n` entities.
pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}

/// Assert two records match, tolerating sub-millisecond timestamp truncation.
pub fn assert_same_payment(actual: &PaymentRecord, expected: &PaymentRecord) {
    assert_eq!(actual.id, expected.id);
    assert_eq!(actual.user_id, expected.user_id);
    assert_eq!(actual.order_id, expected.order_id);
    assert!((actual.amount - expected.amount).abs() < f64::EPSILON);
    assert_eq!(actual.currency, expected.currency);
    assert_eq!(actual.method, expected.method);
    assert_eq!(actual.status, expected.status);
    assert_eq!(
        actual.external_authorization_id,
        expected.external_authorization_id
    );
    assert!(
        (actual.created_at - expected.created_at)
            .num_milliseconds()
            .abs()
            <= 1
    );
}
