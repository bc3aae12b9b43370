//! Error types for rollcall.
//!
//! This module defines the crate-wide error type. Validation failures keep
//! their own [`ValidationError`] type and are wrapped here when they cross
//! into storage or CLI code.

use std::path::PathBuf;
use thiserror::Error;

use crate::validate::ValidationError;

/// The main error type for rollcall operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    /// A candidate record or email failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A required field was empty.
    #[error("{field} is required")]
    EmptyField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// No user is registered with the given email.
    #[error("user not found: {email}")]
    UserNotFound {
        /// The email that was looked up.
        email: String,
    },

    /// A user with the given email already exists.
    #[error("a user with email {email} already exists")]
    DuplicateUser {
        /// The conflicting email.
        email: String,
    },

    /// No feedback exists with the given id.
    #[error("feedback {id} not found")]
    FeedbackNotFound {
        /// The requested feedback id.
        id: i64,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for rollcall operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an empty field error.
    #[must_use]
    pub fn empty_field(field: &'static str) -> Self {
        Self::EmptyField { field }
    }

    /// Create a user not found error.
    #[must_use]
    pub fn user_not_found(email: impl Into<String>) -> Self {
        Self::UserNotFound {
            email: email.into(),
        }
    }

    /// Check if this error was caused by user input and can be fixed by
    /// re-entering it.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::EmptyField { .. }
                | Self::UserNotFound { .. }
                | Self::DuplicateUser { .. }
                | Self::FeedbackNotFound { .. }
        )
    }

    /// The wrapped validation error, if any.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}
