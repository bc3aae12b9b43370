//! Command-line interface for rollcall.
//!
//! This module provides the CLI structure for the `rollcall` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, CheckCommand, ConfigCommand, FeedbackCommand, ListCommand, OutputFormat,
    RegisterCommand, StatusCommand, UserCommand,
};

use crate::logging::Verbosity;

/// rollcall - Validated user registration and feedback
///
/// Registers people in a plain-text ledger after checking their name, email
/// and age, and keeps a small SQLite store of users and their feedback.
#[derive(Debug, Parser)]
#[command(name = "rollcall")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all diagnostics except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive registration session
    Register(RegisterCommand),

    /// Validate and register a single entry
    Add(AddCommand),

    /// Validate an entry without registering it
    Check(CheckCommand),

    /// List registered entries
    List(ListCommand),

    /// Manage feedback store users
    #[command(subcommand)]
    User(UserCommand),

    /// Submit and manage feedback
    #[command(subcommand)]
    Feedback(FeedbackCommand),

    /// Show file locations and store counts
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}
