//! `rollcall` - CLI for registration and feedback
//!
//! This binary wires the library's validator, ledger, audit log and feedback
//! store to the command line.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use rollcall::cli::{Cli, Command, ConfigCommand, FeedbackCommand, OutputFormat, UserCommand};
use rollcall::session::{describe, print_entries};
use rollcall::{
    init_logging, validate, AuditLog, CandidateRecord, Config, Error, Ledger, LedgerState,
    Registrar, Session, Storage,
};

type Audit = AuditLog<Box<dyn Write>>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Register(cmd) => handle_register(&config, cmd.no_audit),
        Command::Add(cmd) => handle_add(&config, &cmd.entry),
        Command::Check(cmd) => handle_check(&cmd.entry, cmd.format),
        Command::List(cmd) => handle_list(&config, cmd.format),
        Command::User(cmd) => handle_user(&config, cmd),
        Command::Feedback(cmd) => handle_feedback(&config, cmd),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_audit(config: &Config, disabled: bool) -> anyhow::Result<Audit> {
    if disabled || !config.audit.enabled {
        return Ok(AuditLog::discard().boxed());
    }
    let path = config.audit_path();
    let log =
        AuditLog::open(&path).with_context(|| format!("opening audit log {}", path.display()))?;
    Ok(log.boxed())
}

fn open_storage(config: &Config) -> anyhow::Result<Storage> {
    let path = config.database_path();
    Storage::open(&path).with_context(|| format!("opening feedback store {}", path.display()))
}

/// Print a recoverable error for the operator and map it to a failing exit
/// code; anything else propagates.
fn report(err: Error) -> anyhow::Result<ExitCode> {
    let message = match &err {
        Error::Validation(v) => v.user_message().to_string(),
        Error::UserNotFound { .. } => "User not found!".to_string(),
        Error::EmptyField { field } => format!("{} is required!", capitalize(field)),
        _ if err.is_recoverable() => err.to_string(),
        _ => return Err(err.into()),
    };
    eprintln!("{message}");
    Ok(ExitCode::FAILURE)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn handle_register(config: &Config, no_audit: bool) -> anyhow::Result<ExitCode> {
    let ledger = Ledger::new(config.ledger_path());
    let mut audit = open_audit(config, no_audit)?;
    let mut session = Session::new(Registrar::new(&ledger, &mut audit));

    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(&mut stdin.lock(), &mut stdout.lock())?;
    Ok(ExitCode::SUCCESS)
}

fn handle_add(config: &Config, entry: &str) -> anyhow::Result<ExitCode> {
    let ledger = Ledger::new(config.ledger_path());
    let mut audit = open_audit(config, false)?;
    let mut registrar = Registrar::new(&ledger, &mut audit);

    match registrar.register_line(entry) {
        Ok(registration) => {
            println!("Data has been registered\n");
            println!("{}", describe(&registration));
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report(err),
    }
}

fn handle_check(entry: &str, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let record = CandidateRecord::parse_entry(entry);
    let outcome = validate::accept(&record);

    if format == OutputFormat::Json {
        let value = match &outcome {
            Ok(registration) => serde_json::json!({
                "accepted": true,
                "registration": registration,
            }),
            Err(err) => serde_json::json!({
                "accepted": false,
                "error": err.kind(),
                "value": err.value(),
                "message": err.user_message(),
            }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        match &outcome {
            Ok(registration) => println!("Valid. Category: {}", registration.category),
            Err(err) => println!("{} ({:?})", err.user_message(), err.value()),
        }
    }

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn handle_list(config: &Config, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let ledger = Ledger::new(config.ledger_path());

    if format == OutputFormat::Json {
        let entries = match ledger.entries()? {
            LedgerState::Entries(entries) => entries,
            LedgerState::Missing | LedgerState::Empty => Vec::new(),
        };
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print_entries(&ledger, &mut io::stdout().lock())?;
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_user(config: &Config, cmd: UserCommand) -> anyhow::Result<ExitCode> {
    let storage = open_storage(config)?;

    match cmd {
        UserCommand::Create { name, email } => match storage.create_user(&name, &email) {
            Ok(user) => println!("User created successfully! (id {})", user.id),
            Err(err) => return report(err),
        },
        UserCommand::Show { email, format } => match storage.find_user(&email)? {
            Some(user) if format == OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&user)?);
            }
            Some(user) => println!("User : {} <{}> (id {})", user.name, user.email, user.id),
            None => return report(Error::user_not_found(email)),
        },
        UserCommand::Delete { email } => match storage.delete_user(&email) {
            Ok(()) => println!("User deleted successfully!"),
            Err(err) => return report(err),
        },
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_feedback(config: &Config, cmd: FeedbackCommand) -> anyhow::Result<ExitCode> {
    let storage = open_storage(config)?;

    match cmd {
        FeedbackCommand::Submit { email, text } => match storage.submit_feedback(&email, &text) {
            Ok(id) => println!("Feedback submitted successfully! (id {id})"),
            Err(err) => return report(err),
        },
        FeedbackCommand::List { email, format } => {
            let feedback = match storage.list_feedback(&email) {
                Ok(feedback) => feedback,
                Err(err) => return report(err),
            };
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&feedback)?),
                OutputFormat::Table => {
                    println!("{:>6}  {:<20}  FEEDBACK", "ID", "SUBMITTED");
                    for entry in &feedback {
                        println!(
                            "{:>6}  {:<20}  {}",
                            entry.id,
                            entry.created_at.format("%Y-%m-%d %H:%M:%S"),
                            entry.feedback
                        );
                    }
                }
                OutputFormat::Plain => {
                    for entry in &feedback {
                        println!("{}. {}", entry.id, entry.feedback);
                    }
                }
            }
        }
        FeedbackCommand::Update { id, text } => match storage.update_feedback(id, &text) {
            Ok(()) => println!("Feedback updated successfully!"),
            Err(err) => return report(err),
        },
        FeedbackCommand::Delete { id } => match storage.delete_feedback(id) {
            Ok(()) => println!("Feedback deleted successfully!"),
            Err(err) => return report(err),
        },
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<ExitCode> {
    let ledger = Ledger::new(config.ledger_path());
    let registrations = match ledger.entries()? {
        LedgerState::Entries(entries) => entries.len(),
        LedgerState::Missing | LedgerState::Empty => 0,
    };
    let stats = open_storage(config)?.stats()?;

    if json {
        let status = serde_json::json!({
            "ledger_path": config.ledger_path(),
            "audit_path": config.audit_path(),
            "audit_enabled": config.audit.enabled,
            "database_path": config.database_path(),
            "registrations": registrations,
            "store": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("rollcall status");
        println!("---------------");
        println!("Ledger:        {}", config.ledger_path().display());
        println!("Registrations: {registrations}");
        println!(
            "Audit log:     {}{}",
            config.audit_path().display(),
            if config.audit.enabled { "" } else { " (disabled)" }
        );
        println!("Database:      {}", config.database_path().display());
        println!("Users:         {}", stats.total_users);
        println!("Feedback:      {}", stats.total_feedback);
        println!("Size:          {} bytes", stats.db_size_bytes);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Ledger]");
                println!("  Path:               {}", config.ledger_path().display());
                println!();
                println!("[Audit]");
                println!("  Enabled:            {}", config.audit.enabled);
                println!("  Path:               {}", config.audit_path().display());
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
