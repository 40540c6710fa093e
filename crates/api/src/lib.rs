//! Monarch API server library.
//!
//! Exposes the building blocks (config, state, error handling, extractors,
//! routes) so integration tests and the binary entrypoint share one router.

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod query;
pub mod routes;
pub mod state;
