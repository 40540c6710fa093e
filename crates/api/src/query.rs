//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?offset=&limit=`).
///
/// Values are clamped with `monarch_core::pagination` before they reach
/// the repository layer.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}
