//! # Cli
//!
//! This module contains everything needed for parsing the CLI arguments for Unilog.

use clap::{Parser, ValueEnum};

/// Struct containing the CLI configuration for Unilog.
#[derive(Parser, Debug)]
#[command(author, version, about = "Unilog proof verifier")]
pub struct Cli {
    /// Source files to check, in order.
    #[arg(required = true)]
    pub files: Vec<std::path::PathBuf>,

    /// Specify the log level of the verifier.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level of Unilog.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// A log level, where warnings (e.g. a guide declared but never used) are also logged.
    #[value(alias("1"))]
    Warn,

    /// Also log information about the general state of the verifier, e.g., which file is
    /// currently being checked.
    #[value(alias("2"))]
    Info,

    /// Log everything which happens internally in the pipeline.
    /// Note: this output can be quite verbose.
    #[value(alias("3"))]
    Debug,

    /// Log extra information, down to individual tokens and terms.
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
