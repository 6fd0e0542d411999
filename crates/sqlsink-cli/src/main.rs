//! sqlsink CLI - upsert and DDL statement generator

mod args;
mod config;
mod output;
mod table;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use sqlsink_core::{check_syntax, PlaceholderStyle, SqlDialect};
use tracing::Level;

use crate::args::{Args, Command};
use crate::config::Config;
use crate::output::OutputFormatter;
use crate::table::{expand_patterns, TableFile};

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let level = match (args.quiet, args.verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match run(args) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<bool> {
    let quiet = args.quiet;

    match args.command {
        Command::Upsert {
            files,
            target,
            format,
            check,
        } => {
            let config = Config::load(&target)?.merge_with_args(&files, &target, format);
            let dialect = config.target.build()?;
            let kind = dialect.kind();
            let formatter = OutputFormatter::new(config.output_format(), kind);

            if check
                && kind == SqlDialect::PostgreSQL
                && config.target.placeholders == PlaceholderStyle::Positional
            {
                tracing::warn!(
                    "the PostgreSQL parser does not accept '?' placeholders; \
                     use --numbered-placeholders with --check"
                );
            }

            let table_files = table_files(&config)?;
            let mut failures = 0;
            for path in &table_files {
                let table = TableFile::from_file(path)?;
                let statement = dialect.upsert_statement_for(
                    &table.table,
                    &table.column_refs(),
                    &table.key_refs(),
                )?;

                let file_name = path.display().to_string();
                formatter.print_upsert(&file_name, &statement)?;

                if check {
                    if let Err(e) = check_syntax(kind, statement.sql()) {
                        formatter.print_check_failure(&file_name, &e);
                        failures += 1;
                    }
                }
            }

            if check && !quiet {
                summarize(failures, table_files.len());
            }
            Ok(failures > 0)
        }

        Command::Ddl {
            files,
            target,
            alter,
            format,
        } => {
            let config = Config::load(&target)?.merge_with_args(&files, &target, format);
            let dialect = config.target.build()?;
            let formatter = OutputFormatter::new(config.output_format(), dialect.kind());

            for path in table_files(&config)? {
                let table = TableFile::from_file(&path)?;
                let statements = if alter {
                    dialect.add_columns_statements(&table.table, &table.columns)?
                } else {
                    vec![dialect.create_table_statement(&table.table, &table.columns, &table.key)?]
                };
                formatter.print_ddl(&path.display().to_string(), &statements)?;
            }

            Ok(false)
        }

        Command::Types { target, format } => {
            let config = Config::load(&target)?.merge_with_args(&[], &target, format);
            let dialect = config.target.build()?;
            let formatter = OutputFormatter::new(config.output_format(), dialect.kind());
            formatter.print_types(dialect.type_map())?;
            Ok(false)
        }

        Command::Dialects => {
            println!("Supported dialects:");
            for dialect in SqlDialect::ALL {
                println!("  {:<12} {}", dialect, dialect.aliases().join(", "));
            }
            Ok(false)
        }
    }
}

/// Table files named on the command line or in sqlsink.toml
fn table_files(config: &Config) -> Result<Vec<PathBuf>> {
    let files = expand_patterns(&config.tables)?;
    if files.is_empty() {
        miette::bail!(
            "No table files specified. Use positional arguments or configure `tables` in sqlsink.toml"
        );
    }
    for path in &files {
        ensure_exists(path)?;
    }
    Ok(files)
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        miette::bail!("Table file not found: {}", path.display());
    }
    Ok(())
}

fn summarize(failures: usize, total: usize) {
    if failures > 0 {
        eprintln!("{} of {} statement(s) failed to parse", failures, total);
    } else {
        eprintln!("All {} statement(s) parsed", total);
    }
}

