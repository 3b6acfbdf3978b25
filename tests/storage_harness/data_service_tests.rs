//! Macro-generated test suite for `DataService<PaymentRecord>` contract validation.
//!
//! The `data_service_tests!` macro generates a test module that validates any
//! `DataService<PaymentRecord>` implementation: create/get/list/update,
//! ordering, duplicate ids and concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use payment_records::storage::InMemoryDataService;
//!
//! data_service_tests!(InMemoryDataService::<PaymentRecord>::new());
//! ```
//!
//! # Generated Tests
//!
//! - `test_create_and_get`: create then retrieve, verify all fields
//! - `test_get_nonexistent`: get with random UUID returns None
//! - `test_list_empty`: list on empty store returns empty vec
//! - `test_list_oldest_first`: list is ordered by creation time
//! - `test_update_existing`: status change is persisted
//! - `test_update_nonexistent`: update unknown ID returns Err
//! - `test_create_duplicate_id`: second insert with the same id fails
//! - `test_concurrent_access`: parallel creates from spawned tasks

/// Generate a full `DataService<PaymentRecord>` conformance test suite.
///
/// `$factory` must evaluate to a fresh `DataService<PaymentRecord>`. It is
/// re-evaluated for each test. For the concurrent access test, the returned
/// service must also implement `Clone + 'static`.
#[macro_export]
macro_rules! data_service_tests {
    ($factory:expr) => {
        mod data_service_contract_tests {
            use super::*;
            use payment_records::core::{DataService, Entity, PaymentRecord, PaymentStatus};
            use uuid::Uuid;

            // ==================================================================
            // Create & Get
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let service = $factory;
                let payment = card_payment("order-1", "pi_123");
                let id = payment.id();

                let created = service.create(payment.clone()).await.unwrap();
                assert_same_payment(&created, &payment);

                let retrieved = service.get(&id).await.unwrap();
                let retrieved = retrieved.expect("created payment should be retrievable");
                assert_same_payment(&retrieved, &payment);
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;
                let result = service.get(&Uuid::new_v4()).await.unwrap();
                assert!(result.is_none());
            }

            // ==================================================================
            // List
            // ==================================================================

            #[tokio::test]
            async fn test_list_empty() {
                let service = $factory;
                let all: Vec<PaymentRecord> = service.list().await.unwrap();
                assert!(all.is_empty());
            }

            #[tokio::test]
            async fn test_list_oldest_first() {
                let service = $factory;
                for payment in sample_batch(5) {
                    service.create(payment).await.unwrap();
                }

                let all = service.list().await.unwrap();
                assert_count(&all, 5);
                let orders: Vec<&str> = all.iter().map(|p| p.order_id.as_str()).collect();
                assert_eq!(
                    orders,
                    vec!["order-0", "order-1", "order-2", "order-3", "order-4"]
                );
            }

            // ==================================================================
            // Update
            // ==================================================================

            #[tokio::test]
            async fn test_update_existing() {
                let service = $factory;
                let created = service.create(cod_payment("order-2")).await.unwrap();

                let mut changed = created.clone();
                changed.status = PaymentStatus::Succeeded;
                changed.touch();
                service.update(&created.id, changed).await.unwrap();

                let stored = service.get(&created.id).await.unwrap().unwrap();
                assert_eq!(stored.status, PaymentStatus::Succeeded);
                assert_eq!(stored.order_id, "order-2");
                assert!(stored.updated_at >= created.updated_at);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                let ghost = cod_payment("ghost");
                let id = ghost.id;
                let result = service.update(&id, ghost).await;
                assert!(result.is_err(), "update of a missing payment must fail");
            }

            // ==================================================================
            // Edge Cases
            // ==================================================================

            #[tokio::test]
            async fn test_create_duplicate_id() {
                let service = $factory;
                let payment = cod_payment("order-3");

                service.create(payment.clone()).await.unwrap();
                let second = service.create(payment.clone()).await;

                assert!(second.is_err(), "duplicate id must be rejected");
                assert_count(&service.list().await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_concurrent_access() {
                let service = $factory;

                let handles: Vec<_> = (0..10)
                    .map(|i| {
                        let service = service.clone();
                        tokio::spawn(async move {
                            service
                                .create(cod_payment(&format!("concurrent-{}", i)))
                                .await
                                .unwrap()
                        })
                    })
                    .collect();

                for handle in handles {
                    handle.await.unwrap();
                }

                assert_count(&service.list().await.unwrap(), 10);
            }
        }
    };
}
