//! Reporting backend for food donation providers, receivers, listings and
//! claims.
//!
//! The crate follows a ports-and-adapters layout: [`domain`] holds the
//! query catalog, validation and services; [`outbound`] implements the
//! storage and CSV ports; [`inbound`] exposes them over HTTP.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::Trace;
