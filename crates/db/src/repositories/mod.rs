//! Repositories: one zero-sized struct per table with async query functions.
//!
//! Functions take a `&mut DbConnection` so handlers can run them inside the
//! request's transaction.

pub mod project_repo;

pub use project_repo::ProjectRepo;
