//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Interactive registration arguments.
#[derive(Debug, Args)]
pub struct RegisterCommand {
    /// Do not write audit lines for this session
    #[arg(long)]
    pub no_audit: bool,
}

/// One-shot registration arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Record as "name, email, age"
    pub entry: String,
}

/// Validation-only arguments.
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Record as "name, email, age"
    pub entry: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Ledger listing arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// User management commands.
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a user with the feedback store
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address, used to sign in
        #[arg(short, long)]
        email: String,
    },

    /// Look a user up by email
    Show {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },

    /// Delete a user and all of their feedback
    Delete {
        /// Email address
        #[arg(short, long)]
        email: String,
    },
}

/// Feedback commands.
#[derive(Debug, Subcommand)]
pub enum FeedbackCommand {
    /// Leave feedback as the user with the given email
    Submit {
        /// Email address of an existing user
        #[arg(short, long)]
        email: String,

        /// Feedback text
        text: String,
    },

    /// List a user's feedback
    List {
        /// Email address of an existing user
        #[arg(short, long)]
        email: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Replace the text of a feedback entry
    Update {
        /// Feedback id
        id: i64,

        /// New feedback text
        text: String,
    },

    /// Delete a feedback entry
    Delete {
        /// Feedback id
        id: i64,
    },
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
