/// Primary keys are SQLite `INTEGER PRIMARY KEY` values.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
