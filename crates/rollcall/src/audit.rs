//! Audit trail of registration attempts.
//!
//! An [`AuditLog`] is an ordinary value owned by whoever drives validation.
//! Nothing here is global: two sessions may write to two different logs.
//! Each line reads `2024-05-01 12:30:00,123 - ERROR - Invalid name entered: Al1ce`.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use tracing::debug;

use crate::error::{Error, Result};
use crate::record::Registration;
use crate::validate::ValidationError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Severity of an audit line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditLevel {
    /// A record was accepted.
    Info,
    /// A record was rejected.
    Error,
}

impl fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Line-oriented audit log over any writer.
pub struct AuditLog<W> {
    sink: W,
}

impl<W> fmt::Debug for AuditLog<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditLog").finish_non_exhaustive()
    }
}

impl AuditLog<File> {
    /// Open (or create) an append-only audit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or file cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl AuditLog<io::Sink> {
    /// An audit log that drops every line.
    #[must_use]
    pub fn discard() -> Self {
        Self::new(io::sink())
    }
}

impl<W: Write> AuditLog<W> {
    /// Wrap an arbitrary writer.
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Write one line at the given level.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn record(&mut self, level: AuditLevel, message: &str) -> Result<()> {
        debug!(target: "rollcall::audit", level = %level, "{message}");
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        writeln!(self.sink, "{timestamp} - {level} - {message}")?;
        self.sink.flush()?;
        Ok(())
    }

    /// Record a rejected candidate.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn rejected(&mut self, err: &ValidationError) -> Result<()> {
        self.record(AuditLevel::Error, &err.audit_message())
    }

    /// Record an accepted registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn accepted(&mut self, registration: &Registration) -> Result<()> {
        self.record(
            AuditLevel::Info,
            &format!("User {} entered a valid Details", registration.name),
        )
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Erase the writer type so file-backed and discarding logs share one type.
    pub fn boxed(self) -> AuditLog<Box<dyn Write>>
    where
        W: 'static,
    {
        AuditLog::new(Box::new(self.sink))
    }
}
