//! CLI argument definitions for formsift.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Filter form submissions by their answers.
///
/// Reads a submissions document (the `{"responses": [...]}` envelope or a
/// bare array of submissions) and writes the submissions that match at least
/// one filter clause. Diagnostics go to stderr so stdout stays clean.
///
/// ## Examples
///
/// Keep submissions with more than 5 employees:
///   formsift filter -i responses.json \
///       -f '[{"id": "employees", "condition": "greater_than", "value": 5}]'
///
/// Read from stdin and save a copy:
///   cat responses.json | formsift filter -i - --form-id cLZojxk94ous --save-dir out/
///
/// Validate a clause list:
///   formsift check-filters '[{"id": "email", "condition": "equals", "value": "a@b.c"}]'
#[derive(Parser, Debug)]
#[command(name = "formsift")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log level
    #[arg(long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Filter a submissions document
    Filter(FilterArgs),

    /// Parse a clause list and print it in canonical form
    CheckFilters {
        /// JSON array of `{id, condition, value}` clauses
        filters: String,
    },
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Submissions document to read (`-` for stdin)
    #[arg(short, long)]
    pub input: PathBuf,

    /// JSON array of `{id, condition, value}` clauses
    #[arg(short, long, env = "FORMSIFT_FILTERS")]
    pub filters: Option<String>,

    /// Form identifier, used to name the saved document
    #[arg(long, env = "FORMSIFT_FORM_ID")]
    pub form_id: Option<String>,

    /// Directory to also write `data-<form-id>.json` into
    #[arg(long, env = "FORMSIFT_SAVE_DIR", requires = "form_id")]
    pub save_dir: Option<PathBuf>,

    /// Print single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

impl FilterArgs {
    /// True when the input should be read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}

/// Log level argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level (default, shows filter diagnostics)
    Warn,
    /// Error level (least verbose)
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
