//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "sqlsink")]
#[command(author, version, about = "Generate dialect-specific upsert and DDL statements")]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the upsert statement for each table description
    Upsert {
        /// Table description files (supports glob patterns)
        files: Vec<PathBuf>,

        #[command(flatten)]
        target: TargetArgs,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Parse each generated statement and report those that do not parse
        #[arg(long)]
        check: bool,
    },

    /// Print CREATE TABLE (or ALTER TABLE) statements for each table description
    Ddl {
        /// Table description files (supports glob patterns)
        files: Vec<PathBuf>,

        #[command(flatten)]
        target: TargetArgs,

        /// Emit ALTER TABLE statements adding the non-key columns instead
        #[arg(long)]
        alter: bool,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Display the logical type to column type mapping
    Types {
        #[command(flatten)]
        target: TargetArgs,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List supported dialects and their accepted names
    Dialects,
}

/// Target database selection shared by every generating command
#[derive(clap::Args, Clone, Default)]
pub struct TargetArgs {
    /// SQL dialect (postgresql, mysql, sqlserver, oracle, sqlite)
    #[arg(short, long)]
    pub dialect: Option<String>,

    /// Path to sqlsink.toml (searched upward from the current directory by default)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Quote every identifier
    #[arg(long)]
    pub quote_identifiers: bool,

    /// Use the dialect's numbered placeholders ($1, @P1, :1, ?1) instead of ?
    #[arg(long)]
    pub numbered_placeholders: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// SQL text with parameter comments
    #[default]
    Human,
    /// One JSON object per statement
    Json,
}
