//! Flat-file ledger of accepted registrations.
//!
//! One registration per line, in the layout produced by
//! [`Registration::to_ledger_line`]. The file is only ever appended to.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::record::Registration;

/// What was found when reading the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerState {
    /// The ledger file does not exist yet.
    Missing,
    /// The file exists but holds no entries.
    Empty,
    /// Stored lines, oldest first.
    Entries(Vec<String>),
}

/// Append-only registration ledger backed by a text file.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// Create a ledger handle. The file is created on first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the ledger file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one accepted registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directory cannot be written.
    pub fn append(&self, registration: &Registration) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", registration.to_ledger_line())?;

        debug!(path = %self.path.display(), name = %registration.name, "Appended registration");
        Ok(())
    }

    /// Read back every stored line.
    ///
    /// # Errors
    ///
    /// Returns an error for any I/O failure other than a missing file.
    pub fn entries(&self) -> Result<LedgerState> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(LedgerState::Missing),
            Err(err) => return Err(err.into()),
        };

        let entries: Vec<String> = contents
            .lines()
            .map(|line| line.trim().to_string())
            .collect();

        if entries.is_empty() {
            Ok(LedgerState::Empty)
        } else {
            Ok(LedgerState::Entries(entries))
        }
    }
}
