//! Request handlers.
//!
//! Each submodule provides async handler functions for a single entity type.
//! Handlers run repository calls inside the request's [`DbSession`] and map
//! errors via [`AppError`].
//!
//! [`DbSession`]: crate::extract::DbSession
//! [`AppError`]: crate::error::AppError

pub mod project;
