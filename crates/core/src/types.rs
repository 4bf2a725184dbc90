/// Primary keys are UUID v4 strings stored as SQLite `TEXT`.
pub type RecordId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh record / session identifier.
pub fn new_id() -> RecordId {
    uuid::Uuid::new_v4().to_string()
}
