//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use reshape_core::ContainerInference;
use std::path::PathBuf;

/// Reshape CLI - Declarative object-to-object transformation
///
/// Applies a document of mapping rules to JSON records, validating every
/// produced value against its declared type and constraints.
#[derive(Parser, Debug)]
#[command(
    name = "reshape",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        global = true,
        env = "RESHAPE_LOG_FORMAT",
        default_value = "compact"
    )]
    pub log_format: LogFormat,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "json")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform a JSON record with a rule document
    Run(RunArgs),

    /// Load and validate a rule document without transforming anything
    Check(CheckArgs),

    /// List supported type tags, string formats and transform functions
    Formats,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the rule document (JSON or YAML)
    #[arg(short, long, value_name = "RULES")]
    pub rules: PathBuf,

    /// Path to the source record; reads stdin when omitted
    #[arg(short, long, value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// How missing intermediate containers are created in the output
    #[arg(long, value_enum, default_value = "reserved-items")]
    pub inference: Inference,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the rule document (JSON or YAML)
    #[arg(short, long, value_name = "RULES")]
    pub rules: PathBuf,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Pretty-printed JSON output
    JsonPretty,
    /// YAML output
    Yaml,
}

/// Log output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact single-line records
    Compact,
    /// JSON structured records
    Json,
}

/// Container inference options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Inference {
    /// `items` segments become arrays, everything else an object
    ReservedItems,
    /// An array exactly when the next segment is a numeric index
    NextSegment,
}

impl From<Inference> for ContainerInference {
    fn from(inference: Inference) -> Self {
        match inference {
            Inference::ReservedItems => ContainerInference::ReservedItems,
            Inference::NextSegment => ContainerInference::NextSegment,
        }
    }
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        use is_terminal::IsTerminal;
        !self.no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
    }
}
