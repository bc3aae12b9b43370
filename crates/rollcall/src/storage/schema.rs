//! `SQLite` schema definitions for the feedback store.

/// Registered users. Email is the login key and must be unique.
pub const CREATE_USERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE
)
";

/// Feedback entries, owned by a user and removed with them.
pub const CREATE_FEEDBACK_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS feedback (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    feedback TEXT NOT NULL,
    created_at TEXT NOT NULL
)
";

/// Index for listing a user's feedback.
pub const CREATE_FEEDBACK_USER_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_feedback_user ON feedback(user_id)
";

/// Key-value metadata, used for the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_USERS_TABLE,
    CREATE_FEEDBACK_TABLE,
    CREATE_FEEDBACK_USER_INDEX,
    CREATE_METADATA_TABLE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.trim().is_empty());
        }
    }

    #[test]
    fn test_users_email_unique() {
        assert!(CREATE_USERS_TABLE.contains("email TEXT NOT NULL UNIQUE"));
    }

    #[test]
    fn test_feedback_cascades() {
        assert!(CREATE_FEEDBACK_TABLE.contains("ON DELETE CASCADE"));
    }
}
