//! Server module for building the payment HTTP server
//!
//! This module provides a `ServerBuilder` that registers:
//! - Payment routes backed by an injected store and processor
//! - Health check routes
//! - Any custom routes supplied by the caller

pub mod builder;
pub mod router;

pub use builder::ServerBuilder;
pub use router::{build_health_routes, build_payment_routes};
