//! Interactive registration session.
//!
//! Drives the mode menu and the entry loop over any reader and writer, so the
//! whole conversation can be scripted in tests.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::audit::AuditLog;
use crate::error::{Error, Result};
use crate::ledger::{Ledger, LedgerState};
use crate::record::{CandidateRecord, Registration};
use crate::validate;

const MENU: &str = "\nAvailable modes:\n1. Enter entries\n2. View entries\n3. Exit";
const MODE_PROMPT: &str = "Choose your mode (1/2/3): ";
const ENTRY_PROMPT: &str =
    "\nTo Switch Mode type 'Switch' \nEnter Details Name, Mail, Age separated by ',' : ";
const SWITCH_COMMAND: &str = "switch";

/// Validates candidates and records the accepted ones.
///
/// Owns no global state: the ledger and audit log are supplied by the caller.
#[derive(Debug)]
pub struct Registrar<'a, A> {
    ledger: &'a Ledger,
    audit: &'a mut AuditLog<A>,
}

impl<'a, A: Write> Registrar<'a, A> {
    /// Create a registrar writing to the given ledger and audit log.
    pub fn new(ledger: &'a Ledger, audit: &'a mut AuditLog<A>) -> Self {
        Self { ledger, audit }
    }

    /// Validate a candidate and append it to the ledger when accepted.
    ///
    /// Both outcomes are audited. Nothing reaches the ledger unless
    /// validation passed. A failing audit write is logged and does not change
    /// the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a rejected candidate, or an I/O error
    /// if the ledger cannot be written.
    pub fn register(&mut self, record: &CandidateRecord) -> Result<Registration> {
        match validate::accept(record) {
            Ok(registration) => {
                self.ledger.append(&registration)?;
                if let Err(e) = self.audit.accepted(&registration) {
                    warn!("Failed to write audit line: {e}");
                }
                Ok(registration)
            }
            Err(err) => {
                if let Err(e) = self.audit.rejected(&err) {
                    warn!("Failed to write audit line: {e}");
                }
                Err(err.into())
            }
        }
    }

    /// Parse a `name, email, age` line and register it.
    ///
    /// # Errors
    ///
    /// See [`Registrar::register`].
    pub fn register_line(&mut self, line: &str) -> Result<Registration> {
        self.register(&CandidateRecord::parse_entry(line))
    }

    /// The ledger this registrar appends to.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        self.ledger
    }
}

/// Render an accepted registration for the operator.
#[must_use]
pub fn describe(registration: &Registration) -> String {
    format!(
        "User Name: {}\nEmail: {}\nAge: {}\nCategory: {}",
        registration.name, registration.email, registration.age, registration.category
    )
}

/// Print the ledger contents, numbered from 1.
///
/// # Errors
///
/// Returns an error if the ledger cannot be read or output fails.
pub fn print_entries<W: Write>(ledger: &Ledger, out: &mut W) -> Result<()> {
    match ledger.entries()? {
        LedgerState::Missing => writeln!(out, "File not found. No entries yet.\n")?,
        LedgerState::Empty => writeln!(out, "No entries found.\n")?,
        LedgerState::Entries(entries) => {
            writeln!(out, "Entries from file:")?;
            for (i, line) in entries.iter().enumerate() {
                writeln!(out, "{}. {line}", i + 1)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Where the entry loop hands control back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Menu,
    Eof,
}

/// Interactive menu loop around a [`Registrar`].
#[derive(Debug)]
pub struct Session<'a, A> {
    registrar: Registrar<'a, A>,
}

impl<'a, A: Write> Session<'a, A> {
    /// Create a session over the given registrar.
    pub fn new(registrar: Registrar<'a, A>) -> Self {
        Self { registrar }
    }

    /// Run until the operator exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only for I/O failures; invalid input is reported and
    /// the loop continues.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<()> {
        loop {
            writeln!(out, "{MENU}")?;
            write!(out, "{MODE_PROMPT}")?;
            out.flush()?;

            let Some(choice) = read_line(input)? else {
                return Ok(());
            };

            match choice.trim() {
                "1" => {
                    if self.entry_mode(input, out)? == Flow::Eof {
                        return Ok(());
                    }
                }
                "2" => print_entries(self.registrar.ledger(), out)?,
                "3" => {
                    writeln!(out, "Exiting Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(out, "Invalid choice. Try again.")?,
            }
        }
    }

    fn entry_mode<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<Flow> {
        loop {
            write!(out, "{ENTRY_PROMPT}")?;
            out.flush()?;

            let Some(line) = read_line(input)? else {
                return Ok(Flow::Eof);
            };

            if line.to_lowercase() == SWITCH_COMMAND {
                debug!("Leaving entry mode");
                return Ok(Flow::Menu);
            }

            match self.registrar.register_line(&line) {
                Ok(registration) => {
                    writeln!(out, "Data has been registered \n")?;
                    writeln!(out, "{}\n", describe(&registration))?;
                }
                Err(Error::Validation(err)) => writeln!(out, "{}", err.user_message())?,
                Err(err) => return Err(err),
            }
        }
    }
}

/// Read one line without its terminator; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}
