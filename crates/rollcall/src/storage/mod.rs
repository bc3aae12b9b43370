//! Storage layer for rollcall.
//!
//! `SQLite`-backed store for users and the feedback they leave. A user is
//! identified by email; feedback belongs to exactly one user and disappears
//! with them.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::record::{Feedback, User};
use crate::validate::validate_email;

/// Users and feedback database.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a database at the given path.
    ///
    /// Creates parent directories as needed and initializes the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch(
            "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA foreign_keys=ON;",
        )?;
        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    // === Users ===

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyField`] for a blank name or email,
    /// [`Error::Validation`] for a malformed email and
    /// [`Error::DuplicateUser`] if the email is taken.
    pub fn create_user(&self, name: &str, email: &str) -> Result<User> {
        if name.trim().is_empty() {
            return Err(Error::empty_field("name"));
        }
        if email.trim().is_empty() {
            return Err(Error::empty_field("email"));
        }
        validate_email(email)?;

        if self.find_user(email)?.is_some() {
            return Err(Error::DuplicateUser {
                email: email.to_string(),
            });
        }

        self.conn.execute(
            "INSERT INTO users (name, email) VALUES (?1, ?2)",
            params![name, email],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, email, "Created user");

        Ok(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    /// Look a user up by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn find_user(&self, email: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, name, email FROM users WHERE email = ?1",
                [email],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// Look a user up by email, failing if absent.
    fn require_user(&self, email: &str) -> Result<User> {
        self.find_user(email)?
            .ok_or_else(|| Error::user_not_found(email))
    }

    /// Delete a user and all of their feedback.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyField`] for a blank email and
    /// [`Error::UserNotFound`] if nobody has it.
    pub fn delete_user(&self, email: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(Error::empty_field("email"));
        }
        let affected = self
            .conn
            .execute("DELETE FROM users WHERE email = ?1", [email])?;
        if affected == 0 {
            return Err(Error::user_not_found(email));
        }
        info!(email, "Deleted user");
        Ok(())
    }

    /// Count registered users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count_users(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }

    // === Feedback ===

    /// Store feedback on behalf of the user with the given email.
    ///
    /// Returns the new feedback id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyField`] for blank feedback and
    /// [`Error::UserNotFound`] for an unknown email.
    pub fn submit_feedback(&self, email: &str, feedback: &str) -> Result<i64> {
        if feedback.trim().is_empty() {
            return Err(Error::empty_field("feedback"));
        }
        let user = self.require_user(email)?;

        self.conn.execute(
            "INSERT INTO feedback (user_id, feedback, created_at) VALUES (?1, ?2, ?3)",
            params![user.id, feedback, Utc::now().to_rfc3339()],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, user_id = user.id, "Inserted feedback");
        Ok(id)
    }

    /// All feedback left by the user with the given email, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UserNotFound`] for an unknown email.
    pub fn list_feedback(&self, email: &str) -> Result<Vec<Feedback>> {
        let user = self.require_user(email)?;
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, user_id, feedback, created_at
            FROM feedback WHERE user_id = ?1 ORDER BY id ASC
            ",
        )?;

        let feedback = stmt
            .query_map([user.id], Self::row_to_feedback)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(feedback)
    }

    /// Fetch a single feedback entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_feedback(&self, id: i64) -> Result<Option<Feedback>> {
        let feedback = self
            .conn
            .query_row(
                "SELECT id, user_id, feedback, created_at FROM feedback WHERE id = ?1",
                [id],
                Self::row_to_feedback,
            )
            .optional()?;
        Ok(feedback)
    }

    /// Replace the text of a feedback entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyField`] for blank text and
    /// [`Error::FeedbackNotFound`] for an unknown id.
    pub fn update_feedback(&self, id: i64, feedback: &str) -> Result<()> {
        if feedback.trim().is_empty() {
            return Err(Error::empty_field("feedback"));
        }
        let affected = self.conn.execute(
            "UPDATE feedback SET feedback = ?1 WHERE id = ?2",
            params![feedback, id],
        )?;
        if affected == 0 {
            return Err(Error::FeedbackNotFound { id });
        }
        debug!(id, "Updated feedback");
        Ok(())
    }

    /// Delete a feedback entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FeedbackNotFound`] for an unknown id.
    pub fn delete_feedback(&self, id: i64) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM feedback WHERE id = ?1", [id])?;
        if affected == 0 {
            return Err(Error::FeedbackNotFound { id });
        }
        debug!(id, "Deleted feedback");
        Ok(())
    }

    /// Count stored feedback entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count_feedback(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM feedback", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_users: self.count_users()?,
            total_feedback: self.count_feedback()?,
            db_size_bytes,
        })
    }

    fn row_to_feedback(row: &rusqlite::Row) -> rusqlite::Result<Feedback> {
        let created_at_str: String = row.get(3)?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str).map_or_else(
            |_| {
                warn!("Unparseable feedback timestamp: {}", created_at_str);
                DateTime::<Utc>::default()
            },
            |dt| dt.with_timezone(&Utc),
        );

        Ok(Feedback {
            id: row.get(0)?,
            user_id: row.get(1)?,
            feedback: row.get(2)?,
            created_at,
        })
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    /// Number of registered users.
    pub total_users: i64,
    /// Number of feedback entries.
    pub total_feedback: i64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationError;

    fn create_test_storage() -> Storage {
        Storage::open_in_memory().expect("failed to create test storage")
    }

    fn storage_with_alice() -> Storage {
        let storage = create_test_storage();
        storage.create_user("Alice", "alice@example.com").unwrap();
        storage
    }

    #[test]
    fn test_open_in_memory() {
        let storage = create_test_storage();
        assert_eq!(storage.path().to_string_lossy(), ":memory:");
        assert_eq!(storage.count_users().unwrap(), 0);
    }

    #[test]
    fn test_create_and_find_user() {
        let storage = create_test_storage();
        let user = storage.create_user("Alice", "alice@example.com").unwrap();

        let found = storage.find_user("alice@example.com").unwrap().unwrap();
        assert_eq!(found, user);
        assert!(storage.find_user("bob@example.com").unwrap().is_none());
    }

    #[test]
    fn test_create_user_requires_fields() {
        let storage = create_test_storage();
        assert!(matches!(
            storage.create_user("", "alice@example.com"),
            Err(Error::EmptyField { field: "name" })
        ));
        assert!(matches!(
            storage.create_user("Alice", "  "),
            Err(Error::EmptyField { field: "email" })
        ));
    }

    #[test]
    fn test_create_user_rejects_bad_email() {
        let storage = create_test_storage();
        let err = storage.create_user("Alice", "alice-at-example").unwrap_err();
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::InvalidEmail("alice-at-example".to_string()))
        );
        assert_eq!(storage.count_users().unwrap(), 0);
    }

    #[test]
    fn test_create_user_duplicate_email() {
        let storage = storage_with_alice();
        let err = storage
            .create_user("Another", "alice@example.com")
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateUser { .. }));
        assert_eq!(storage.count_users().unwrap(), 1);
    }

    #[test]
    fn test_submit_and_list_feedback() {
        let storage = storage_with_alice();
        let first = storage
            .submit_feedback("alice@example.com", "Great service")
            .unwrap();
        let second = storage
            .submit_feedback("alice@example.com", "Could be faster")
            .unwrap();
        assert!(second > first);

        let feedback = storage.list_feedback("alice@example.com").unwrap();
        assert_eq!(feedback.len(), 2);
        assert_eq!(feedback[0].feedback, "Great service");
        assert_eq!(feedback[1].feedback, "Could be faster");
    }

    #[test]
    fn test_list_feedback_is_per_user() {
        let storage = storage_with_alice();
        storage.create_user("Bob", "bob@example.com").unwrap();
        storage
            .submit_feedback("alice@example.com", "From Alice")
            .unwrap();
        storage.submit_feedback("bob@example.com", "From Bob").unwrap();

        let bob = storage.list_feedback("bob@example.com").unwrap();
        assert_eq!(bob.len(), 1);
        assert_eq!(bob[0].feedback, "From Bob");
    }

    #[test]
    fn test_submit_feedback_unknown_user() {
        let storage = create_test_storage();
        let err = storage
            .submit_feedback("ghost@example.com", "Hello")
            .unwrap_err();
        assert!(matches!(err, Error::UserNotFound { .. }));
    }

    #[test]
    fn test_submit_feedback_blank() {
        let storage = storage_with_alice();
        let err = storage
            .submit_feedback("alice@example.com", "   ")
            .unwrap_err();
        assert!(matches!(err, Error::EmptyField { field: "feedback" }));
        assert_eq!(storage.count_feedback().unwrap(), 0);
    }

    #[test]
    fn test_update_feedback() {
        let storage = storage_with_alice();
        let id = storage
            .submit_feedback("alice@example.com", "Draft")
            .unwrap();

        storage.update_feedback(id, "Final").unwrap();
        assert_eq!(storage.get_feedback(id).unwrap().unwrap().feedback, "Final");
    }

    #[test]
    fn test_update_feedback_errors() {
        let storage = storage_with_alice();
        let id = storage
            .submit_feedback("alice@example.com", "Draft")
            .unwrap();

        assert!(matches!(
            storage.update_feedback(id, ""),
            Err(Error::EmptyField { .. })
        ));
        assert!(matches!(
            storage.update_feedback(9999, "text"),
            Err(Error::FeedbackNotFound { id: 9999 })
        ));
    }

    #[test]
    fn test_delete_feedback() {
        let storage = storage_with_alice();
        let id = storage
            .submit_feedback("alice@example.com", "Remove me")
            .unwrap();

        storage.delete_feedback(id).unwrap();
        assert!(storage.get_feedback(id).unwrap().is_none());
        assert!(matches!(
            storage.delete_feedback(id),
            Err(Error::FeedbackNotFound { .. })
        ));
    }

    #[test]
    fn test_delete_user_cascades() {
        let storage = storage_with_alice();
        storage
            .submit_feedback("alice@example.com", "One")
            .unwrap();
        storage
            .submit_feedback("alice@example.com", "Two")
            .unwrap();

        storage.delete_user("alice@example.com").unwrap();
        assert_eq!(storage.count_users().unwrap(), 0);
        assert_eq!(storage.count_feedback().unwrap(), 0);
    }

    #[test]
    fn test_delete_unknown_user() {
        let storage = create_test_storage();
        assert!(matches!(
            storage.delete_user("ghost@example.com"),
            Err(Error::UserNotFound { .. })
        ));
        assert!(matches!(
            storage.delete_user(""),
            Err(Error::EmptyField { .. })
        ));
    }

    #[test]
    fn test_stats() {
        let storage = storage_with_alice();
        storage
            .submit_feedback("alice@example.com", "Hi")
            .unwrap();

        let stats = storage.stats().unwrap();
        assert_eq!(stats.total_users, 1);
        assert_eq!(stats.total_feedback, 1);
        assert_eq!(stats.db_size_bytes, 0);
    }

    #[test]
    fn test_unicode_feedback() {
        let storage = storage_with_alice();
        let id = storage
            .submit_feedback("alice@example.com", "Très bien 👍")
            .unwrap();
        assert_eq!(
            storage.get_feedback(id).unwrap().unwrap().feedback,
            "Très bien 👍"
        );
    }

    #[test]
    fn test_open_file_based_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("rollcall_storage_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let db_path = dir.join("nested/feedback.db");

        {
            let storage = Storage::open(&db_path).unwrap();
            storage.create_user("Alice", "alice@example.com").unwrap();
            assert_eq!(storage.path(), db_path);
            assert!(storage.stats().unwrap().db_size_bytes > 0);
        }

        let reopened = Storage::open(&db_path).unwrap();
        assert_eq!(reopened.count_users().unwrap(), 1);
        drop(reopened);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
