//! Core record types for rollcall.
//!
//! This module defines the data structures that flow between the validator,
//! the registration ledger and the feedback store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Age bucket derived from an accepted registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Younger than 18.
    Underage,
    /// Strictly between 18 and 60.
    Adult,
    /// Exactly 18, or 60 and older.
    Senior,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Underage => write!(f, "Underage"),
            Self::Adult => write!(f, "Adult"),
            Self::Senior => write!(f, "Senior"),
        }
    }
}

/// An unvalidated `(name, email, age)` tuple as typed by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Free-text name.
    pub name: String,
    /// Free-text email address.
    pub email: String,
    /// Age, still in its textual form.
    pub age: String,
}

impl CandidateRecord {
    /// Create a candidate from its three raw fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age: age.into(),
        }
    }

    /// Parse a comma-separated `name, email, age` line.
    ///
    /// Each field is trimmed. Missing fields become empty strings, which the
    /// validator then rejects; fields past the third are ignored.
    #[must_use]
    pub fn parse_entry(line: &str) -> Self {
        let mut fields = line.split(',').map(str::trim);
        let mut next = || fields.next().unwrap_or_default().to_string();
        let name = next();
        let email = next();
        let age = next();
        Self { name, email, age }
    }
}

/// A candidate that passed validation, annotated with its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Validated name.
    pub name: String,
    /// Validated email address.
    pub email: String,
    /// Validated age, kept exactly as entered.
    pub age: String,
    /// Derived age category.
    pub category: Category,
}

impl Registration {
    /// Render the registration in the fixed ledger line layout.
    #[must_use]
    pub fn to_ledger_line(&self) -> String {
        format!(
            "Name:{}, Email:{}, Age:{}, Category:{}. ",
            self.name, self.email, self.age, self.category
        )
    }
}

/// A user known to the feedback store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Row identifier assigned by storage.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: String,
}

/// A piece of feedback left by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Row identifier assigned by storage.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// The feedback text.
    pub feedback: String,
    /// When the feedback was first submitted.
    pub created_at: DateTime<Utc>,
}
