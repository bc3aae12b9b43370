//! `rollcall` - validated user registration and feedback
//!
//! The heart of the crate is [`validate`]: pure functions that decide whether
//! a `(name, email, age)` tuple is acceptable and which age category it falls
//! into. Around it sit a flat-file [`ledger`], a caller-owned [`audit`] log,
//! an interactive [`session`] and a `SQLite` [`storage`] of users and feedback.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod record;
pub mod session;
pub mod storage;
pub mod validate;

pub use audit::AuditLog;
pub use config::Config;
pub use error::{Error, Result};
pub use ledger::{Ledger, LedgerState};
pub use logging::init_logging;
pub use record::{CandidateRecord, Category, Feedback, Registration, User};
pub use session::{Registrar, Session};
pub use storage::{Storage, StorageStats};
pub use validate::{accept, categorize, validate, ValidationError};
