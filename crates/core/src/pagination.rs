//! Offset/limit pagination helpers for list endpoints.

/// Page size used when the caller does not pass `limit`.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Resolve a user-provided limit, falling back to `default`.
///
/// There is no upper bound. Negative values become zero, which yields an
/// empty page on every backend (PostgreSQL rejects a negative `LIMIT`).
pub fn clamp_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).max(0)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
