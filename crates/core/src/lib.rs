//! Shared primitives for the Monarch backend.
//!
//! Nothing in here touches the database or HTTP; both the `db` and `api`
//! crates build on these types.

pub mod error;
pub mod pagination;
pub mod patch;
pub mod types;
