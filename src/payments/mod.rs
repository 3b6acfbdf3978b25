//! Payment record service and its HTTP surface

pub mod handlers;
pub mod service;

pub use handlers::{
    PaymentAppState, create_payment, get_payment, list_payments, update_payment_status,
};
pub use service::{CreatedPayment, NewPayment, PaymentService};
